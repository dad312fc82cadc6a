//! Lookup query parameter validation and normalization.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::directory::{normalize_phone, LookupCriteria};
use crate::http::error::ApiError;

const MAX_PHONE_LEN: usize = 20;
const MAX_CUSTOMER_ID_LEN: usize = 50;

/// Raw lookup query parameters as supplied by the client.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupParams {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub customer_id: Option<String>,
}

impl LookupParams {
    /// Echo the query back to the client, omitting absent criteria.
    pub fn echo(&self) -> Value {
        let mut query = serde_json::Map::new();
        if let Some(phone) = &self.phone {
            query.insert("phone".to_string(), json!(phone));
        }
        if let Some(email) = &self.email {
            query.insert("email".to_string(), json!(email));
        }
        if let Some(id) = &self.customer_id {
            query.insert("customerId".to_string(), json!(id));
        }
        Value::Object(query)
    }
}

/// Validate raw parameters into exactly one normalized criterion.
///
/// Precedence when several are supplied: phone > email > customerId, first
/// non-empty wins. Empty strings count as absent.
pub fn validate_lookup(params: &LookupParams) -> Result<LookupCriteria, ApiError> {
    let phone = params.phone.as_deref().filter(|s| !s.is_empty());
    let email = params.email.as_deref().filter(|s| !s.is_empty());
    let customer_id = params.customer_id.as_deref().filter(|s| !s.is_empty());

    if phone.is_none() && email.is_none() && customer_id.is_none() {
        return Err(ApiError::bad_request(
            "Must provide one of: phone, email, or customerId",
        ));
    }

    if let Some(phone) = phone {
        if phone.len() > MAX_PHONE_LEN {
            return Err(ApiError::bad_request("Invalid phone number"));
        }
        return Ok(LookupCriteria::Phone(normalize_phone(phone)));
    }

    if let Some(email) = email {
        let Some(email) = sanitize_email(email) else {
            return Err(ApiError::bad_request("Invalid email address"));
        };
        return Ok(LookupCriteria::Email(email));
    }

    let customer_id = customer_id.expect("one criterion must remain");
    if customer_id.len() > MAX_CUSTOMER_ID_LEN {
        return Err(ApiError::bad_request("Invalid customer ID"));
    }
    Ok(LookupCriteria::CustomerId(customer_id.to_string()))
}

/// Basic `local@domain.tld` shape check; returns the lower-cased address.
/// No whitespace or extra `@` in either part, and the domain needs a dot.
fn sanitize_email(email: &str) -> Option<String> {
    let (local, domain) = email.split_once('@')?;
    let part_ok = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace) && !s.contains('@');
    if part_ok(local) && part_ok(domain) && domain.rsplit_once('.').is_some_and(|(h, t)| !h.is_empty() && !t.is_empty())
    {
        Some(email.to_lowercase())
    } else {
        None
    }
}
