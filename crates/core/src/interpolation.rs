use std::collections::HashMap;
use std::fmt::Display;

use leon::Template;

use crate::error::Result;

/// Captures display arguments as owned strings, so they can be queued.
pub fn capture_arguments(args: &[&dyn Display]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

/// Substitutes positional arguments (`{0}`, `{1}`, ...) into `format`.
///
/// A format written without arguments is returned untouched, so arbitrary
/// text (option tables, echoed answers) never has to be valid template syntax.
pub fn interpolate(format: &str, args: &[String]) -> Result<String> {
    if args.is_empty() {
        return Ok(format.to_string());
    }

    let context: HashMap<String, String> = args
        .iter()
        .enumerate()
        .map(|(i, value)| (i.to_string(), value.clone()))
        .collect();

    let template = Template::parse(format)?;
    Ok(template.render(&context)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_positional() {
        let args = capture_arguments(&[&"Beta", &2]);
        assert_eq!(interpolate("@{1}) {0}", &args).unwrap(), "@2) Beta");
    }

    #[test]
    fn test_interpolate_repeated_argument() {
        let args = vec!["Ok".to_string()];
        assert_eq!(
            interpolate("Type \"{0}\" or not {0}", &args).unwrap(),
            "Type \"Ok\" or not Ok"
        );
    }

    #[test]
    fn test_without_arguments_format_is_verbatim() {
        assert_eq!(interpolate("{not a key} }{", &[]).unwrap(), "{not a key} }{");
    }

    #[test]
    fn test_missing_argument_is_an_error() {
        let args = vec!["only".to_string()];
        assert!(interpolate("{0} {1}", &args).is_err());
    }
}
