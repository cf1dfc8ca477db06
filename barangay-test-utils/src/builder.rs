//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_user_table: bool,
    include_all_tables: bool,
    // (email, role)
    users: Vec<(String, String)>,
    statements: Vec<String>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_user_table: false,
            include_all_tables: false,
            users: Vec::new(),
            statements: Vec::new(),
        }
    }

    /// Add the users table to the test database.
    ///
    /// The users table is referenced by appointments, document requests and notifications,
    /// create it before adding any of those tables with [`with_table`](Self::with_table).
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_table = true;
        self
    }

    /// Add every application table to the test database.
    pub fn with_all_tables(mut self) -> Self {
        self.include_all_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use barangay_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), barangay_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Resident)
    ///     .with_table(SecurityIncident)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Execute a raw SQL statement during `build()`, after every table has been created.
    ///
    /// Used for schema objects entities cannot describe, such as partial unique indexes.
    pub fn with_statement(mut self, sql: impl Into<String>) -> Self {
        self.statements.push(sql.into());
        self
    }

    /// Insert a user with the provided role during `build()`.
    ///
    /// Users are inserted in call order, so the first queued user receives ID 1.
    pub fn with_user(mut self, email: impl Into<String>, role: impl Into<String>) -> Self {
        self.users.push((email.into(), role.into()));
        self
    }

    /// Build the test context by creating all configured tables and fixtures.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        // 1. Create tables
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        let mut all_tables = Vec::new();

        if self.include_all_tables {
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::BarangayUser),
                schema.create_table_from_entity(entity::prelude::Resident),
                schema.create_table_from_entity(entity::prelude::SecurityIncident),
                schema.create_table_from_entity(entity::prelude::Appointment),
                schema.create_table_from_entity(entity::prelude::DocumentRequest),
                schema.create_table_from_entity(entity::prelude::Notification),
            ]);
        } else if self.include_user_table {
            all_tables.push(schema.create_table_from_entity(entity::prelude::BarangayUser));
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for sql in &self.statements {
            setup.db.execute_unprepared(sql).await?;
        }

        // 2. Insert database fixtures
        for (email, role) in self.users {
            setup.user().insert_user_with_email(&email, &role).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
