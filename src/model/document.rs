use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{require_non_blank, workflow::StatusWorkflow, ValidationError};

string_enum! {
    pub enum DocumentType {
        BarangayClearance => "barangay_clearance",
        CertificateOfResidency => "certificate_of_residency",
        CertificateOfIndigency => "certificate_of_indigency",
        BusinessPermit => "business_permit",
        Other => "other",
    }
}

string_enum! {
    pub enum DocumentStatus {
        Pending => "pending",
        Processing => "processing",
        Ready => "ready",
        Released => "released",
        Rejected => "rejected",
    }
}

impl StatusWorkflow for DocumentStatus {
    fn next_statuses(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Processing, Self::Rejected],
            Self::Processing => &[Self::Ready, Self::Rejected],
            Self::Ready => &[Self::Released],
            Self::Released | Self::Rejected => &[],
        }
    }
}

impl DocumentType {
    pub fn title(&self) -> &'static str {
        match self {
            Self::BarangayClearance => "Barangay Clearance",
            Self::CertificateOfResidency => "Certificate of Residency",
            Self::CertificateOfIndigency => "Certificate of Indigency",
            Self::BusinessPermit => "Business Permit",
            Self::Other => "Document",
        }
    }
}

/// A request for a barangay-issued document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DocumentRequestDto {
    pub id: i32,
    pub user_id: i32,
    /// Display name of the requesting user
    pub requester_name: Option<String>,
    pub document_type: DocumentType,
    pub purpose: String,
    pub status: DocumentStatus,
    pub remarks: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request body for requesting a document
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateDocumentRequestDto {
    pub document_type: DocumentType,
    pub purpose: String,
}

impl CreateDocumentRequestDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("purpose", &self.purpose)
    }
}

/// Request body for moving a document request to another status
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DocumentStatusDto {
    pub status: DocumentStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}
