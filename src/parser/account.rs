//! Gas account lookup

/// First configured account id that appears verbatim in the text
pub fn find_gas_account<'a>(text: &str, account_ids: &'a [String]) -> Option<&'a str> {
    account_ids
        .iter()
        .find(|id| text.contains(id.as_str()))
        .map(String::as_str)
}
