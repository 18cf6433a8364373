use crate::domain::model::{
    CustomerRecord, RawRecord, StoreContext, DEFAULT_GROUP_ID, EMAIL_FIELD, FIRST_NAME_FIELD,
    LAST_NAME_FIELD, REQUIRED_FIELDS,
};
use crate::utils::error::{ImportError, Result};

/// Maps `emailaddress`, `fname` and `lname` onto a customer record scoped to `ctx`.
///
/// Header names are matched case-sensitively. All three keys must be present
/// and the email must be non-blank; other keys are ignored.
pub fn map_record(mut raw: RawRecord, ctx: &StoreContext) -> Result<CustomerRecord> {
    if let Some(field) = raw.first_missing(&REQUIRED_FIELDS) {
        return Err(ImportError::MissingField {
            field: field.to_string(),
        });
    }

    let email = take_trimmed(&mut raw, EMAIL_FIELD);
    if email.is_empty() {
        return Err(ImportError::EmptyField {
            field: EMAIL_FIELD.to_string(),
        });
    }

    Ok(CustomerRecord {
        email,
        first_name: take_trimmed(&mut raw, FIRST_NAME_FIELD),
        last_name: take_trimmed(&mut raw, LAST_NAME_FIELD),
        website_id: ctx.website_id,
        store_id: ctx.store_id,
        group_id: DEFAULT_GROUP_ID,
    })
}

fn take_trimmed(raw: &mut RawRecord, key: &str) -> String {
    raw.remove(key)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}
