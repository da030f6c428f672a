//! Registration entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::registration::{
    CampSummary, PaymentStatus, Registration, RegistrationStatus, RegistrationWithCamp,
};

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub camp_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub pesel: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub zhp_status: Option<String>,
    pub notes: Option<String>,
    pub registration_status: String,
    pub payment_status: String,
    pub paid_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RegistrationEntity> for Registration {
    fn from(entity: RegistrationEntity) -> Self {
        Self {
            id: entity.id,
            camp_id: entity.camp_id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            pesel: entity.pesel,
            birth_date: entity.birth_date,
            email: entity.email,
            phone: entity.phone,
            address: entity.address,
            city: entity.city,
            postal_code: entity.postal_code,
            zhp_status: entity.zhp_status,
            notes: entity.notes,
            registration_status: entity
                .registration_status
                .parse()
                .unwrap_or(RegistrationStatus::Pending),
            payment_status: entity
                .payment_status
                .parse()
                .unwrap_or(PaymentStatus::Pending),
            paid_amount: entity.paid_amount,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Registration row joined with its camp columns.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationWithCampEntity {
    pub id: Uuid,
    pub camp_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub pesel: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub zhp_status: Option<String>,
    pub notes: Option<String>,
    pub registration_status: String,
    pub payment_status: String,
    pub paid_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Camp columns
    pub camp_name: String,
    pub camp_start_date: NaiveDate,
    pub camp_end_date: NaiveDate,
    pub camp_price: f64,
}

impl From<RegistrationWithCampEntity> for RegistrationWithCamp {
    fn from(entity: RegistrationWithCampEntity) -> Self {
        let camp = CampSummary {
            name: entity.camp_name.clone(),
            start_date: entity.camp_start_date,
            end_date: entity.camp_end_date,
            price: entity.camp_price,
        };
        let registration = Registration {
            id: entity.id,
            camp_id: entity.camp_id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            pesel: entity.pesel,
            birth_date: entity.birth_date,
            email: entity.email,
            phone: entity.phone,
            address: entity.address,
            city: entity.city,
            postal_code: entity.postal_code,
            zhp_status: entity.zhp_status,
            notes: entity.notes,
            registration_status: entity
                .registration_status
                .parse()
                .unwrap_or(RegistrationStatus::Pending),
            payment_status: entity
                .payment_status
                .parse()
                .unwrap_or(PaymentStatus::Pending),
            paid_amount: entity.paid_amount,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        };
        Self { registration, camp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_joined_entity() -> RegistrationWithCampEntity {
        RegistrationWithCampEntity {
            id: Uuid::new_v4(),
            camp_id: Uuid::new_v4(),
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            pesel: "12345678901".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2012, 5, 1).unwrap(),
            email: "jan@example.com".to_string(),
            phone: "+48 600 700 800".to_string(),
            address: "ul. Polna 1".to_string(),
            city: "Gdańsk".to_string(),
            postal_code: "80-001".to_string(),
            zhp_status: None,
            notes: None,
            registration_status: "confirmed".to_string(),
            payment_status: "partial".to_string(),
            paid_amount: 400.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            camp_name: "Obóz żeglarski".to_string(),
            camp_start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            camp_end_date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
            camp_price: 1500.0,
        }
    }

    #[test]
    fn joined_entity_splits_into_registration_and_camp() {
        let joined: RegistrationWithCamp = sample_joined_entity().into();
        assert_eq!(
            joined.registration.registration_status,
            RegistrationStatus::Confirmed
        );
        assert_eq!(joined.registration.payment_status, PaymentStatus::Partial);
        assert_eq!(joined.camp.name, "Obóz żeglarski");
        assert_eq!(joined.camp.price, 1500.0);
    }

    #[test]
    fn unknown_status_falls_back_to_pending() {
        let mut entity = sample_joined_entity();
        entity.registration_status = "archived".to_string();
        let joined: RegistrationWithCamp = entity.into();
        assert_eq!(
            joined.registration.registration_status,
            RegistrationStatus::Pending
        );
    }
}
