//! Jurisdiction extraction from free-text provider addresses.
//!
//! Routing services answer with formatted addresses such as
//! `"1100 Congress Ave, Austin, TX 78701, USA"`. The state code is the first
//! token of the third comma-separated part.

use crate::error::AddressParseFailure;

/// Extract a two-letter state code from a formatted address.
pub fn state_code(address: &str) -> Result<String, AddressParseFailure> {
    if address.trim().is_empty() {
        return Err(AddressParseFailure::MissingAddress);
    }

    let part = address
        .split(',')
        .nth(2)
        .ok_or_else(|| AddressParseFailure::TooFewParts {
            address: address.to_string(),
        })?;

    let token = part.split_whitespace().next().unwrap_or_default();
    if token.len() == 2 && token.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(token.to_ascii_uppercase())
    } else {
        Err(AddressParseFailure::NotAStateCode {
            token: token.to_string(),
        })
    }
}

/// State code of the first address in a provider's address list.
pub fn first_state_code(addresses: &[String]) -> Result<String, AddressParseFailure> {
    addresses
        .first()
        .ok_or(AddressParseFailure::MissingAddress)
        .and_then(|address| state_code(address))
}
