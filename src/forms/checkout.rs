use std::collections::HashSet;

use lazy_static::lazy_static;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::billing_address::NewBillingAddress;
use crate::forms::sanitize_inline_text;

/// Maximum length of every free-text address field.
const ADDRESS_MAX_LEN: usize = 100;
const ADDRESS_MAX_LEN_VALIDATOR: u64 = ADDRESS_MAX_LEN as u64;

/// Result type returned by the checkout form helpers.
pub type CheckoutFormResult<T> = Result<T, CheckoutFormError>;

/// Errors that can occur while processing the checkout form.
#[derive(Debug, Error)]
pub enum CheckoutFormError {
    /// The request body could not be decoded as a form.
    #[error("malformed form body: {0}")]
    Malformed(String),
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A required field is empty after sanitization.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    /// The country is not an ISO 3166-1 alpha-2 code.
    #[error("invalid country `{0}`")]
    InvalidCountry(String),
    /// Unknown payment option.
    #[error("invalid payment option `{0}`")]
    InvalidPaymentOption(String),
}

/// Payment methods offered on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOption {
    Stripe,
    PayPal,
}

impl PaymentOption {
    fn parse(value: &str) -> CheckoutFormResult<Self> {
        match value.trim() {
            "S" => Ok(Self::Stripe),
            "P" => Ok(Self::PayPal),
            other => Err(CheckoutFormError::InvalidPaymentOption(other.to_string())),
        }
    }
}

/// Raw checkout form. Every field defaults so that a partially filled form
/// still decodes and is rejected by validation instead.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CheckoutForm {
    #[serde(default)]
    #[validate(length(max = ADDRESS_MAX_LEN_VALIDATOR))]
    pub street_address: String,
    #[serde(default)]
    #[validate(length(max = ADDRESS_MAX_LEN_VALIDATOR))]
    pub apartment_address: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    #[validate(length(max = ADDRESS_MAX_LEN_VALIDATOR))]
    pub zip: String,
    /// Checkbox; present when ticked.
    #[serde(default)]
    pub same_shipping_address: Option<String>,
    /// Checkbox; present when ticked.
    #[serde(default)]
    pub save_info: Option<String>,
    #[serde(default)]
    pub payment_option: Option<String>,
}

/// Normalized checkout submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPayload {
    pub address: NewBillingAddress,
    pub payment_option: PaymentOption,
    pub same_shipping_address: bool,
    pub save_info: bool,
}

impl CheckoutForm {
    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn from_body(body: &[u8]) -> CheckoutFormResult<Self> {
        serde_html_form::from_bytes(body).map_err(|err| CheckoutFormError::Malformed(err.to_string()))
    }

    /// Validates and sanitizes the payload into a billing address for `user_id`.
    pub fn into_payload(self, user_id: i32) -> CheckoutFormResult<CheckoutPayload> {
        self.validate()?;

        let street_address = sanitize_inline_text(&self.street_address);
        if street_address.is_empty() {
            return Err(CheckoutFormError::EmptyField("street address"));
        }

        let zip = sanitize_inline_text(&self.zip);
        if zip.is_empty() {
            return Err(CheckoutFormError::EmptyField("zip"));
        }

        let country = sanitize_country(&self.country)?;

        let payment_option = match self.payment_option.as_deref() {
            Some(value) => PaymentOption::parse(value)?,
            None => return Err(CheckoutFormError::EmptyField("payment option")),
        };

        Ok(CheckoutPayload {
            address: NewBillingAddress {
                user_id,
                street_address,
                apartment_address: sanitize_inline_text(&self.apartment_address),
                country,
                zip,
            },
            payment_option,
            same_shipping_address: is_checked(self.same_shipping_address.as_deref()),
            save_info: is_checked(self.save_info.as_deref()),
        })
    }
}

const ISO_COUNTRY_CODES: &str = "\
    AD AE AF AG AI AL AM AO AQ AR AS AT AU AW AX AZ \
    BA BB BD BE BF BG BH BI BJ BL BM BN BO BQ BR BS \
    BT BV BW BY BZ CA CC CD CF CG CH CI CK CL CM CN \
    CO CR CU CV CW CX CY CZ DE DJ DK DM DO DZ EC EE \
    EG EH ER ES ET FI FJ FK FM FO FR GA GB GD GE GF \
    GG GH GI GL GM GN GP GQ GR GS GT GU GW GY HK HM \
    HN HR HT HU ID IE IL IM IN IO IQ IR IS IT JE JM \
    JO JP KE KG KH KI KM KN KP KR KW KY KZ LA LB LC \
    LI LK LR LS LT LU LV LY MA MC MD ME MF MG MH MK \
    ML MM MN MO MP MQ MR MS MT MU MV MW MX MY MZ NA \
    NC NE NF NG NI NL NO NP NR NU NZ OM PA PE PF PG \
    PH PK PL PM PN PR PS PT PW PY QA RE RO RS RU RW \
    SA SB SC SD SE SG SH SI SJ SK SL SM SN SO SR SS \
    ST SV SX SY SZ TC TD TF TG TH TJ TK TL TM TN TO \
    TR TT TV TW TZ UA UG UM US UY UZ VA VC VE VG VI \
    VN VU WF WS YE YT ZA ZM ZW";

lazy_static! {
    /// ISO 3166-1 alpha-2 codes currently assigned.
    static ref COUNTRY_CODES: HashSet<&'static str> =
        ISO_COUNTRY_CODES.split_whitespace().collect();
}

fn sanitize_country(input: &str) -> CheckoutFormResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CheckoutFormError::EmptyField("country"));
    }

    let code = trimmed.to_ascii_uppercase();
    if COUNTRY_CODES.contains(code.as_str()) {
        Ok(code)
    } else {
        Err(CheckoutFormError::InvalidCountry(trimmed.to_string()))
    }
}

fn is_checked(value: Option<&str>) -> bool {
    matches!(value, Some(raw) if !raw.is_empty() && raw != "false" && raw != "off")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            street_address: "  ул. Ленина,   5 ".to_string(),
            apartment_address: " кв. 12 ".to_string(),
            country: "ru".to_string(),
            zip: " 101000 ".to_string(),
            same_shipping_address: Some("on".to_string()),
            save_info: None,
            payment_option: Some("S".to_string()),
        }
    }

    #[test]
    fn checkout_form_builds_billing_address() {
        let payload = filled_form().into_payload(7).expect("valid form");

        assert_eq!(payload.address.user_id, 7);
        assert_eq!(payload.address.street_address, "ул. Ленина, 5");
        assert_eq!(payload.address.apartment_address, "кв. 12");
        assert_eq!(payload.address.country, "RU");
        assert_eq!(payload.address.zip, "101000");
        assert_eq!(payload.payment_option, PaymentOption::Stripe);
        assert!(payload.same_shipping_address);
        assert!(!payload.save_info);
    }

    #[test]
    fn checkout_form_rejects_missing_street() {
        let mut form = filled_form();
        form.street_address = "   ".to_string();

        assert!(matches!(
            form.into_payload(1),
            Err(CheckoutFormError::EmptyField("street address"))
        ));
    }

    #[test]
    fn checkout_form_rejects_bad_country() {
        let mut form = filled_form();
        form.country = "Russia".to_string();

        assert!(matches!(
            form.into_payload(1),
            Err(CheckoutFormError::InvalidCountry(value)) if value == "Russia"
        ));
    }

    #[test]
    fn checkout_form_rejects_unassigned_country_codes() {
        for code in ["ZZ", "xx", "AA"] {
            let mut form = filled_form();
            form.country = code.to_string();

            assert!(matches!(
                form.into_payload(1),
                Err(CheckoutFormError::InvalidCountry(value)) if value == code
            ));
        }
    }

    #[test]
    fn checkout_form_accepts_assigned_country_codes() {
        for (input, expected) in [(" de ", "DE"), ("Us", "US"), ("ZW", "ZW")] {
            let mut form = filled_form();
            form.country = input.to_string();

            let payload = form.into_payload(1).expect("valid country");
            assert_eq!(payload.address.country, expected);
        }
    }

    #[test]
    fn checkout_form_requires_known_payment_option() {
        let mut form = filled_form();
        form.payment_option = Some("X".to_string());
        assert!(matches!(
            form.into_payload(1),
            Err(CheckoutFormError::InvalidPaymentOption(_))
        ));

        let mut form = filled_form();
        form.payment_option = None;
        assert!(matches!(
            form.into_payload(1),
            Err(CheckoutFormError::EmptyField("payment option"))
        ));
    }

    #[test]
    fn checkout_form_rejects_overlong_fields() {
        let mut form = filled_form();
        form.zip = "1".repeat(ADDRESS_MAX_LEN + 1);

        assert!(matches!(
            form.into_payload(1),
            Err(CheckoutFormError::Validation(_))
        ));
    }

    #[test]
    fn from_body_decodes_urlencoded_payload() {
        let body = b"street_address=Main+St&apartment_address=&country=de&zip=10115&payment_option=P";

        let form = CheckoutForm::from_body(body).expect("decodes");
        let payload = form.into_payload(3).expect("valid form");

        assert_eq!(payload.address.street_address, "Main St");
        assert_eq!(payload.address.apartment_address, "");
        assert_eq!(payload.address.country, "DE");
        assert_eq!(payload.payment_option, PaymentOption::PayPal);
    }

    #[test]
    fn from_body_tolerates_missing_fields() {
        let form = CheckoutForm::from_body(b"zip=1").expect("decodes");

        assert!(form.into_payload(1).is_err());
    }
}
