//! Endpoint and server URLs for one org.

pub fn token_url(domain: &str) -> String {
    format!("https://{}/services/oauth2/token", domain)
}

/// The REST API base for one API version; also the server URL of the
/// generated document.
pub fn server_url(domain: &str, version: &str) -> String {
    format!("https://{}/services/data/{}", domain, version)
}

pub fn describe_url(domain: &str, version: &str, object: &str) -> String {
    format!("{}/sobjects/{}/describe", server_url(domain, version), object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(
            token_url("acme.my.salesforce.com"),
            "https://acme.my.salesforce.com/services/oauth2/token"
        );
        assert_eq!(
            server_url("acme.my.salesforce.com", "v64.0"),
            "https://acme.my.salesforce.com/services/data/v64.0"
        );
        assert_eq!(
            describe_url("acme.my.salesforce.com", "v64.0", "Account"),
            "https://acme.my.salesforce.com/services/data/v64.0/sobjects/Account/describe"
        );
    }
}
