use log::{debug, info};
use scraper::Html;

use crate::client::Client;
use crate::consts::{
    IDP_COOKIE_URL, IDP_LINK_URL, IDP_LOGIN_URL, PASSWORD_FIELD, PROCEED_FIELD, PROCEED_VALUE,
    SAML_AUTH_URL, SAML_RESPONSE_FIELD, USERNAME_FIELD,
};
use crate::error::{Error, Result, ResultExt};
use crate::form::Form;
use crate::scrape::select_all;
use crate::transport::Transport;

impl<T: Transport> Client<T> {
    // Authenticates the session with Quest using a WatIAM username and
    // password.
    pub fn login(&mut self, user: &str, pass: &str) -> Result<()> {
        let login_url = self.prelogin().context("performing prelogin sequence")?;

        let form: Form = [
            (USERNAME_FIELD, user),
            (PASSWORD_FIELD, pass),
            (PROCEED_FIELD, PROCEED_VALUE),
        ]
        .into_iter()
        .collect();
        // The IDP answers 200 for its own error pages too, so the body decides.
        let res = self.post_form(&login_url, &form, "performing IDP login")?;

        let saml_response = parse_saml_response(&res.body)
            .context("parsing login response body for SAML response")?;
        debug!("got SAML response ({} bytes)", saml_response.len());

        let form: Form = [(SAML_RESPONSE_FIELD, saml_response)].into_iter().collect();
        self.post_form(SAML_AUTH_URL, &form, "authenticating with Quest")?;

        self.mark_authenticated();
        info!("Logged into Quest");
        Ok(())
    }

    // Primes the IDP cookies and discovers the per-session login URL.
    fn prelogin(&self) -> Result<String> {
        self.get(IDP_COOKIE_URL, "fetching IDP prelogin cookies")?;

        let res = self.get(IDP_LINK_URL, "fetching dynamic IDP login URL")?;
        match res.url.query() {
            Some(query) if !query.is_empty() => Ok(format!("{IDP_LOGIN_URL}?{query}")),
            _ => Err(Error::LoginUrlUnavailable),
        }
    }
}

// Extracts the SAML assertion from the IDP's auto-submitting response page.
pub fn parse_saml_response(body: &str) -> Result<String> {
    let doc = Html::parse_document(body);
    let inputs = select_all(doc.root_element(), r#"input[type="hidden"]"#)?;

    let [input] = inputs.as_slice() else {
        return Err(Error::structure("hidden input tag", inputs.len()));
    };
    input
        .value()
        .attr("value")
        .map(str::to_string)
        .ok_or_else(|| Error::MissingAttribute {
            what: "form input".to_string(),
            attr: "value",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_saml_response() {
        let body = r#"<html><body onload="document.forms[0].submit()">
            <form action="https://quest.pecs.uwaterloo.ca/psp/SS/ACADEMIC/SA/h/?tab=DEFAULT" method="post">
            <input type="hidden" name="SAMLResponse" value="PHNhbWxwOlJlc3BvbnNlPg=="/>
            <input type="submit" value="Continue"/>
            </form></body></html>"#;
        assert_eq!(parse_saml_response(body).unwrap(), "PHNhbWxwOlJlc3BvbnNlPg==");
    }

    #[test]
    fn test_parse_saml_response_rejects_login_page() {
        let body = r#"<form><input type="text" name="j_username"/>
            <input type="password" name="j_password"/></form>"#;
        let err = parse_saml_response(body).unwrap_err();
        assert!(matches!(err, Error::Structure { count: 0, .. }));

        let body = r#"<input type="hidden" name="a" value="1"><input type="hidden" name="b" value="2">"#;
        let err = parse_saml_response(body).unwrap_err();
        assert!(matches!(err, Error::Structure { count: 2, .. }));
    }

    #[test]
    fn test_parse_saml_response_requires_value() {
        let err = parse_saml_response(r#"<input type="hidden" name="SAMLResponse">"#).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { attr: "value", .. }));
    }
}
