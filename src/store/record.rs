use crate::{
    model::{
        appointment::AppointmentDto, document::DocumentRequestDto, incident::IncidentDto,
        notification::NotificationDto, realtime::ChangeTable, resident::ResidentDto,
    },
    store::Record,
};

impl Record for ResidentDto {
    const TABLE: ChangeTable = ChangeTable::Residents;

    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.full_name(), self.address.clone()];
        fields.extend(
            [&self.email, &self.phone, &self.purok, &self.occupation]
                .into_iter()
                .flatten()
                .cloned(),
        );
        fields
    }
}

impl Record for IncidentDto {
    const TABLE: ChangeTable = ChangeTable::SecurityIncidents;

    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.title.clone(),
            self.description.clone(),
            self.location.clone(),
            self.incident_type.to_string(),
        ];
        fields.extend(
            [&self.reporter_name, &self.assignee_name]
                .into_iter()
                .flatten()
                .cloned(),
        );
        fields
    }
}

impl Record for AppointmentDto {
    const TABLE: ChangeTable = ChangeTable::Appointments;

    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.service.clone(), self.appointment_type.to_string()];
        fields.extend(
            [&self.user_name, &self.staff_name]
                .into_iter()
                .flatten()
                .cloned(),
        );
        fields
    }
}

impl Record for DocumentRequestDto {
    const TABLE: ChangeTable = ChangeTable::Documents;

    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.document_type.title().to_string(),
            self.purpose.clone(),
        ];
        fields.extend(self.requester_name.iter().cloned());
        fields
    }
}

impl Record for NotificationDto {
    const TABLE: ChangeTable = ChangeTable::Notifications;

    fn id(&self) -> i32 {
        self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.title.clone(), self.message.clone()]
    }
}

#[cfg(test)]
mod tests {
    use crate::{model::resident::tests::resident, store::Record};

    /// Expect the full name to be searchable across first and last name
    #[test]
    fn resident_full_name_is_searchable() {
        let maria = resident(1, "Maria", "Santos");

        assert!(maria
            .search_fields()
            .iter()
            .any(|field| field.contains("Maria Santos")));
    }

    /// Expect optional fields to be skipped when unset
    #[test]
    fn resident_skips_unset_fields() {
        let maria = resident(1, "Maria", "Santos");

        // full name, address, purok
        assert_eq!(maria.search_fields().len(), 3);
    }
}
