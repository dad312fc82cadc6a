//! Customer record schema and fixture data.
//!
//! The wire format is camelCase except `lifetime_value`, which the original
//! CRM export left snake_case; clients depend on it, so it is preserved.

use serde::{Deserialize, Serialize};

/// A single canned CRM customer record.
///
/// `customer_id` uniquely determines every other field. Records are loaded
/// once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub customer_id: String,
    pub phone: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub account_number: String,
    pub account_id: String,

    // Interaction history
    pub last_interaction_date: String,
    pub total_interactions: u32,
    pub last_interaction_type: String,

    // Business context
    pub claim_id: Option<String>,
    pub claim_status: String,
    pub claim_amount: f64,
    pub order_id: String,
    pub order_status: String,
    pub case_id: Option<String>,
    pub case_status: String,
    pub contract_id: String,
    pub product_id: String,
    pub line_of_business: String,

    // Customer segment
    pub tier: String,
    #[serde(rename = "lifetime_value")]
    pub lifetime_value: u64,
    pub sentiment: String,

    // Location & preferences
    pub timezone: String,
    pub locale: String,
    pub preferred_contact_method: String,

    // Metadata
    pub created_date: String,
    pub last_updated: String,
}

/// The four-record fixture set backing the mock directory.
pub(crate) fn seed_customers() -> Vec<CustomerRecord> {
    vec![
        CustomerRecord {
            customer_id: "CUST-12345".to_string(),
            phone: "+1(209) 816-5965".to_string(),
            email: "john.doe@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            account_number: "ACC-98765".to_string(),
            account_id: "SFDC-ACC-001".to_string(),
            last_interaction_date: "2026-02-15T14:32:00Z".to_string(),
            total_interactions: 47,
            last_interaction_type: "phone".to_string(),
            claim_id: Some("CLM-2024-09-001".to_string()),
            claim_status: "Active".to_string(),
            claim_amount: 5250.0,
            order_id: "ORD-54321".to_string(),
            order_status: "Completed".to_string(),
            case_id: Some("CASE-789".to_string()),
            case_status: "In Progress".to_string(),
            contract_id: "CON-11111".to_string(),
            product_id: "PROD-WARRANTY-PLUS".to_string(),
            line_of_business: "Auto Warranty".to_string(),
            tier: "Gold".to_string(),
            lifetime_value: 15_000,
            sentiment: "Positive".to_string(),
            timezone: "America/Los_Angeles".to_string(),
            locale: "en_US".to_string(),
            preferred_contact_method: "phone".to_string(),
            created_date: "2020-03-15".to_string(),
            last_updated: "2026-02-18T10:45:00Z".to_string(),
        },
        CustomerRecord {
            customer_id: "CUST-67890".to_string(),
            phone: "+1(555) 234-5678".to_string(),
            email: "sarah.smith@example.com".to_string(),
            first_name: "Sarah".to_string(),
            last_name: "Smith".to_string(),
            account_number: "ACC-54321".to_string(),
            account_id: "SFDC-ACC-002".to_string(),
            last_interaction_date: "2026-02-10T09:15:00Z".to_string(),
            total_interactions: 23,
            last_interaction_type: "email".to_string(),
            claim_id: Some("CLM-2024-08-015".to_string()),
            claim_status: "Closed".to_string(),
            claim_amount: 1200.0,
            order_id: "ORD-12345".to_string(),
            order_status: "Processing".to_string(),
            case_id: Some("CASE-456".to_string()),
            case_status: "Resolved".to_string(),
            contract_id: "CON-22222".to_string(),
            product_id: "PROD-STANDARD".to_string(),
            line_of_business: "Home Protection".to_string(),
            tier: "Silver".to_string(),
            lifetime_value: 8_500,
            sentiment: "Neutral".to_string(),
            timezone: "America/New_York".to_string(),
            locale: "en_US".to_string(),
            preferred_contact_method: "email".to_string(),
            created_date: "2021-06-22".to_string(),
            last_updated: "2026-02-18T08:30:00Z".to_string(),
        },
        CustomerRecord {
            customer_id: "CUST-11111".to_string(),
            phone: "+1(415) 555-0123".to_string(),
            email: "michael.johnson@example.com".to_string(),
            first_name: "Michael".to_string(),
            last_name: "Johnson".to_string(),
            account_number: "ACC-11111".to_string(),
            account_id: "SFDC-ACC-003".to_string(),
            last_interaction_date: "2026-02-01T16:45:00Z".to_string(),
            total_interactions: 89,
            last_interaction_type: "chat".to_string(),
            claim_id: Some("CLM-2024-07-042".to_string()),
            claim_status: "Pending Review".to_string(),
            claim_amount: 3500.0,
            order_id: "ORD-67890".to_string(),
            order_status: "Shipped".to_string(),
            case_id: Some("CASE-123".to_string()),
            case_status: "On Hold".to_string(),
            contract_id: "CON-33333".to_string(),
            product_id: "PROD-PREMIUM-ELITE".to_string(),
            line_of_business: "Business Continuity".to_string(),
            tier: "Platinum".to_string(),
            lifetime_value: 42_000,
            sentiment: "Very Positive".to_string(),
            timezone: "America/Chicago".to_string(),
            locale: "en_US".to_string(),
            preferred_contact_method: "phone".to_string(),
            created_date: "2018-01-10".to_string(),
            last_updated: "2026-02-18T11:20:00Z".to_string(),
        },
        CustomerRecord {
            customer_id: "CUST-22222".to_string(),
            phone: "+1(310) 555-9876".to_string(),
            email: "emily.brown@example.com".to_string(),
            first_name: "Emily".to_string(),
            last_name: "Brown".to_string(),
            account_number: "ACC-22222".to_string(),
            account_id: "SFDC-ACC-004".to_string(),
            last_interaction_date: "2026-01-25T13:20:00Z".to_string(),
            total_interactions: 15,
            last_interaction_type: "phone".to_string(),
            claim_id: None,
            claim_status: "No Active Claims".to_string(),
            claim_amount: 0.0,
            order_id: "ORD-99999".to_string(),
            order_status: "Pending".to_string(),
            case_id: None,
            case_status: "No Open Cases".to_string(),
            contract_id: "CON-44444".to_string(),
            product_id: "PROD-STARTER".to_string(),
            line_of_business: "Retail".to_string(),
            tier: "Bronze".to_string(),
            lifetime_value: 2_500,
            sentiment: "Neutral".to_string(),
            timezone: "America/Denver".to_string(),
            locale: "en_US".to_string(),
            preferred_contact_method: "email".to_string(),
            created_date: "2023-11-05".to_string(),
            last_updated: "2026-02-18T09:10:00Z".to_string(),
        },
    ]
}
