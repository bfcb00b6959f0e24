use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::path::PathBuf;

/// Generate an OpenAPI definition for one Salesforce object.
#[derive(Parser, Debug, Clone)]
#[command(name = "sfdc2openapi", long_about = None)]
pub struct Args {
    #[arg(
        short,
        long,
        value_parser = NonEmptyStringValueParser::new(),
        help = "Salesforce domain name to connect to."
    )]
    pub domain: String,

    #[arg(
        short,
        long,
        value_parser = NonEmptyStringValueParser::new(),
        help = "Salesforce API version (e.g. \"v64.0\")."
    )]
    pub version: String,

    #[arg(
        short,
        long,
        value_parser = NonEmptyStringValueParser::new(),
        help = "Salesforce object to include in the generated OpenAPI definition."
    )]
    pub object: String,

    #[arg(
        short = 'O',
        long,
        help = "Output path where the generated OpenAPI definition should be saved."
    )]
    pub output: PathBuf,

    #[arg(
        short = 'i',
        long,
        help = "Client ID used to connect to Salesforce. Read from SFDC_CLIENT_ID when omitted."
    )]
    pub client_id: Option<String>,

    #[arg(
        short = 's',
        long,
        help = "Client secret used to connect to Salesforce. Read from SFDC_CLIENT_SECRET when omitted."
    )]
    pub client_secret: Option<String>,

    #[arg(short = 'D', long, help = "Print the describe request and response.")]
    pub debug: bool,

    #[arg(
        short,
        long,
        help = "OpenAPI template to specialize instead of the bundled one."
    )]
    pub template: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_flags() {
        let args = Args::try_parse_from([
            "sfdc2openapi",
            "-d",
            "acme.my.salesforce.com",
            "-v",
            "v64.0",
            "-o",
            "Account",
            "-O",
            "account.json",
            "-i",
            "id",
            "-s",
            "secret",
            "-D",
        ])
        .unwrap();

        assert_eq!(args.domain, "acme.my.salesforce.com");
        assert_eq!(args.version, "v64.0");
        assert_eq!(args.object, "Account");
        assert_eq!(args.output, PathBuf::from("account.json"));
        assert_eq!(args.client_id.as_deref(), Some("id"));
        assert_eq!(args.client_secret.as_deref(), Some("secret"));
        assert!(args.debug);
        assert_eq!(args.template, None);
    }

    #[test]
    fn test_parse_long_flags_without_credentials() {
        let args = Args::try_parse_from([
            "sfdc2openapi",
            "--domain",
            "acme.my.salesforce.com",
            "--version",
            "v64.0",
            "--object",
            "Contact",
            "--output",
            "out/contact.json",
            "--template",
            "custom.json",
        ])
        .unwrap();

        assert_eq!(args.client_id, None);
        assert_eq!(args.client_secret, None);
        assert!(!args.debug);
        assert_eq!(args.template, Some(PathBuf::from("custom.json")));
    }

    #[test]
    fn test_object_is_required() {
        let result = Args::try_parse_from([
            "sfdc2openapi",
            "-d",
            "acme.my.salesforce.com",
            "-v",
            "v64.0",
            "-O",
            "account.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_values_are_rejected() {
        let valid = [
            "sfdc2openapi",
            "-d",
            "acme.my.salesforce.com",
            "-v",
            "v64.0",
            "-o",
            "Account",
            "-O",
            "account.json",
        ];
        assert!(Args::try_parse_from(valid).is_ok());

        for position in [2, 4, 6] {
            let mut argv = valid;
            argv[position] = "";
            let result = Args::try_parse_from(argv);
            assert!(result.is_err(), "{} accepted an empty value", valid[position - 1]);
        }
    }
}
