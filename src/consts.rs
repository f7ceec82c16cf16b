// Quest endpoints and the PeopleSoft form field names they expect.

pub const BASE_URL: &str = "https://quest.pecs.uwaterloo.ca/psc/SS/ACADEMIC/SA/c/";
pub const STUDENT_CENTER_URL: &str =
    "https://quest.pecs.uwaterloo.ca/psc/SS/ACADEMIC/SA/c/SA_LEARNER_SERVICES.SSS_STUDENT_CENTER.GBL";
pub const GRADES_URL: &str =
    "https://quest.pecs.uwaterloo.ca/psc/SS/ACADEMIC/SA/c/UW_SS_MENU.UW_SSR_SSENRL_GRDE.GBL";
pub const SCHEDULES_URL: &str =
    "https://quest.pecs.uwaterloo.ca/psc/SS/ACADEMIC/SA/c/SA_LEARNER_SERVICES.SSR_SSENRL_LIST.GBL";

// Identity provider handshake.
pub const IDP_COOKIE_URL: &str =
    "https://quest.pecs.uwaterloo.ca/psp/SS/ACADEMIC/SA/?cmd=login&languageCd=ENG";
pub const IDP_LINK_URL: &str =
    "https://idp.uwaterloo.ca/idp/profile/SAML2/Unsolicited/SSO?providerId=quest.ss.apps.uwaterloo.ca";
pub const IDP_LOGIN_URL: &str = "https://idp.uwaterloo.ca/idp/profile/SAML2/Unsolicited/SSO";
pub const SAML_AUTH_URL: &str = "https://quest.pecs.uwaterloo.ca/psp/SS/ACADEMIC/SA/h/?tab=DEFAULT";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const USERNAME_FIELD: &str = "j_username";
pub const PASSWORD_FIELD: &str = "j_password";
pub const PROCEED_FIELD: &str = "_eventId_proceed";
pub const PROCEED_VALUE: &str = "Login";
pub const SAML_RESPONSE_FIELD: &str = "SAMLResponse";

pub const AJAX_FIELD: &str = "ICAJAX";
pub const NAV_TYPE_FIELD: &str = "ICNAVTYPEDROPDOWN";
pub const ACTION_FIELD: &str = "ICAction";
pub const MAIN_GOTO_FIELD: &str = "DERIVED_SSTSNAV_SSTS_MAIN_GOTO$27$";
pub const MAIN_GOTO_VALUE: &str = "9999";

pub const GRADES_ACTION: &str = "UW_DRVD_SSS_SCT_SSR_PB_GO";
pub const GRADES_TERM_FIELD: &str = "SSR_DUMMY_RECV1$sels$1$$0";
pub const SCHEDULES_ACTION: &str = "DERIVED_SSS_SCT_SSR_PB_GO";
pub const SCHEDULES_TERM_FIELD: &str = "SSR_DUMMY_RECV1$sels$0$$0";

// Container holding the PeopleSoft session-continuity inputs.
pub const HIDDEN_FIELDS_ID: &str = "win0divPSHIDDENFIELDS";

// Renderer output for an empty cell.
pub const NBSP: &str = "\u{a0}";

// Joins a field id and its row index, e.g. `TERM_CAR$0`.
pub const INDEX_DELIMITER: char = '$';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_urls_share_base() {
        for url in [STUDENT_CENTER_URL, GRADES_URL, SCHEDULES_URL] {
            assert!(url.starts_with(BASE_URL), "{url}");
        }
    }

    #[test]
    fn test_idp_link_targets_login_endpoint() {
        assert!(IDP_LINK_URL.starts_with(IDP_LOGIN_URL));
    }
}
