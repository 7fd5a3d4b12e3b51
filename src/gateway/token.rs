//! Token scraping from the upstream "cuando llega" page
//!
//! The page embeds a line like `$jwt = 'ZXlKaGJHY2lPaUpJVXpJMU5pSjk=';`.
//! The quoted value is base64 of the token the predictor expects in `t`.

use base64::Engine;
use base64::engine::general_purpose;
use std::sync::LazyLock;

use regex::Regex;

use super::error::GatewayError;

static JWT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$jwt\s=\s'(.*)'").expect("valid token pattern"));

/// Extracts and decodes the upstream token. When the page declares `$jwt`
/// more than once, the last declaration wins.
pub fn extract_token(page: &str) -> Result<String, GatewayError> {
    let encoded = JWT_PATTERN
        .captures_iter(page)
        .filter_map(|captures| captures.get(1))
        .last()
        .map(|m| m.as_str())
        .ok_or(GatewayError::TokenNotFound)?;

    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| GatewayError::TokenDecode(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| GatewayError::TokenDecode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token() {
        let page = r#"
<script>
    var $jwt = 'c2VjcmV0LXRva2Vu';
</script>
"#;
        assert_eq!(extract_token(page).unwrap(), "secret-token");
    }

    #[test]
    fn test_last_declaration_wins() {
        let page = "$jwt = 'Zmlyc3Q='\n<p>...</p>\n$jwt = 'c2Vjb25k'\n";
        assert_eq!(extract_token(page).unwrap(), "second");
    }

    #[test]
    fn test_missing_token() {
        let result = extract_token("<html><body>mantenimiento</body></html>");
        assert!(matches!(result, Err(GatewayError::TokenNotFound)));
        assert!(result.unwrap_err().is_token_error());
    }

    #[test]
    fn test_pattern_is_reused_across_calls() {
        for _ in 0..3 {
            assert_eq!(extract_token("$jwt = 'c2VjcmV0LXRva2Vu'").unwrap(), "secret-token");
        }
        assert_eq!(JWT_PATTERN.captures_len(), 2);
    }

    #[test]
    fn test_invalid_base64() {
        let result = extract_token("$jwt = '***not base64***'");
        assert!(matches!(result, Err(GatewayError::TokenDecode(_))));
    }

    #[test]
    fn test_requires_single_spaces_around_equals() {
        assert!(matches!(
            extract_token("$jwt='c2VjcmV0LXRva2Vu'"),
            Err(GatewayError::TokenNotFound)
        ));
    }
}
