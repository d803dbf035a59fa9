//! Staff and department models.
//!
//! Roles and shift labels only matter upstream of the scheduler: they decide
//! who lands in the eligible pool. The scheduler itself sees
//! [`EligibleStaff`], an `(id, department)` pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A hospital department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    /// Department identifier (1-based, insertion order).
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Bed/patient capacity.
    pub capacity: u32,
    /// Whether the department delivers patient care.
    pub is_clinical: bool,
}

/// A staff member on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Role-prefixed identifier (e.g. `MD7001`).
    pub id: String,
    /// Job role.
    pub role: StaffRole,
    /// Home department.
    pub department_id: u32,
    /// Shift label (e.g. `Day`, `Night`, `day`).
    pub shift: String,
}

/// The scheduler's view of a staff member eligible for one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleStaff {
    /// Staff identifier.
    pub staff_id: String,
    /// Department copied onto every appointment this staff member serves.
    pub department_id: u32,
}

impl EligibleStaff {
    /// Creates an eligible staff entry.
    pub fn new(staff_id: impl Into<String>, department_id: u32) -> Self {
        Self {
            staff_id: staff_id.into(),
            department_id,
        }
    }
}

/// Job roles on the hospital roster.
///
/// Serialized with their human-readable names (`"Registered Nurse"`), which
/// is also the key used in department staffing tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StaffRole {
    #[serde(rename = "Doctor")]
    Doctor,
    #[serde(rename = "Registered Nurse")]
    RegisteredNurse,
    #[serde(rename = "Nursing Assistant")]
    NursingAssistant,
    #[serde(rename = "Respiratory Therapist")]
    RespiratoryTherapist,
    #[serde(rename = "Radiology Technician")]
    RadiologyTechnician,
    #[serde(rename = "Administrative Staff")]
    AdministrativeStaff,
    #[serde(rename = "Receptionist")]
    Receptionist,
    #[serde(rename = "Human Resources")]
    HumanResources,
    #[serde(rename = "Cleaner")]
    Cleaner,
    #[serde(rename = "Cook")]
    Cook,
    #[serde(rename = "Kitchen Assistant")]
    KitchenAssistant,
    #[serde(rename = "Maintenance Technician")]
    MaintenanceTechnician,
    #[serde(rename = "Pharmacist")]
    Pharmacist,
    #[serde(rename = "Pharmacy Technician")]
    PharmacyTechnician,
    #[serde(rename = "Lab Technician")]
    LabTechnician,
    #[serde(rename = "IT Support")]
    ItSupport,
    #[serde(rename = "Security Personnel")]
    SecurityPersonnel,
    #[serde(rename = "Ophthalmic Technician")]
    OphthalmicTechnician,
    #[serde(rename = "Physical Therapist")]
    PhysicalTherapist,
}

impl StaffRole {
    /// Every role, in roster order.
    pub const ALL: [StaffRole; 19] = [
        Self::Doctor,
        Self::RegisteredNurse,
        Self::NursingAssistant,
        Self::RespiratoryTherapist,
        Self::RadiologyTechnician,
        Self::AdministrativeStaff,
        Self::Receptionist,
        Self::HumanResources,
        Self::Cleaner,
        Self::Cook,
        Self::KitchenAssistant,
        Self::MaintenanceTechnician,
        Self::Pharmacist,
        Self::PharmacyTechnician,
        Self::LabTechnician,
        Self::ItSupport,
        Self::SecurityPersonnel,
        Self::OphthalmicTechnician,
        Self::PhysicalTherapist,
    ];

    /// Human-readable role name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Doctor => "Doctor",
            Self::RegisteredNurse => "Registered Nurse",
            Self::NursingAssistant => "Nursing Assistant",
            Self::RespiratoryTherapist => "Respiratory Therapist",
            Self::RadiologyTechnician => "Radiology Technician",
            Self::AdministrativeStaff => "Administrative Staff",
            Self::Receptionist => "Receptionist",
            Self::HumanResources => "Human Resources",
            Self::Cleaner => "Cleaner",
            Self::Cook => "Cook",
            Self::KitchenAssistant => "Kitchen Assistant",
            Self::MaintenanceTechnician => "Maintenance Technician",
            Self::Pharmacist => "Pharmacist",
            Self::PharmacyTechnician => "Pharmacy Technician",
            Self::LabTechnician => "Lab Technician",
            Self::ItSupport => "IT Support",
            Self::SecurityPersonnel => "Security Personnel",
            Self::OphthalmicTechnician => "Ophthalmic Technician",
            Self::PhysicalTherapist => "Physical Therapist",
        }
    }

    /// Staff ID prefix for this role.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Doctor => "MD",
            Self::RegisteredNurse => "RN",
            Self::NursingAssistant => "NA",
            Self::RespiratoryTherapist => "RT",
            Self::RadiologyTechnician => "RDT",
            Self::AdministrativeStaff => "AD",
            Self::Receptionist => "RC",
            Self::HumanResources => "HR",
            Self::Cleaner => "CL",
            Self::Cook => "CK",
            Self::KitchenAssistant => "KA",
            Self::MaintenanceTechnician => "MT",
            Self::Pharmacist => "PH",
            Self::PharmacyTechnician => "PT",
            Self::LabTechnician => "LT",
            Self::ItSupport => "IT",
            Self::SecurityPersonnel => "SC",
            Self::OphthalmicTechnician => "OT",
            Self::PhysicalTherapist => "PHT",
        }
    }

    /// Whether this role can take patient appointments.
    pub fn is_clinical(&self) -> bool {
        matches!(
            self,
            Self::Doctor
                | Self::RegisteredNurse
                | Self::NursingAssistant
                | Self::RespiratoryTherapist
                | Self::RadiologyTechnician
                | Self::OphthalmicTechnician
                | Self::PhysicalTherapist
        )
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.name() == s)
            .ok_or_else(|| format!("unknown staff role '{s}'"))
    }
}
