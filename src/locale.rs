//! Bilingual UI strings, keyed by a closed locale enum so a missing
//! translation cannot happen at runtime.

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// Parse a language tag ("en" / "ar"), case-insensitive.
    pub fn from_tag(tag: &str) -> Option<Language> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Language::En => &EN,
            Language::Ar => &AR,
        }
    }
}

/// Fully-populated message record for one locale.
#[derive(Debug)]
pub struct Messages {
    pub invalid_number: &'static str,
    pub price_range_order: &'static str,
    pub area_range_order: &'static str,
    pub filter_apply_failed: &'static str,
    pub session_expired: &'static str,
    pub property_not_found: &'static str,
    pub otp_sent: &'static str,
    pub invalid_otp: &'static str,
}

static EN: Messages = Messages {
    invalid_number: "Must be a valid positive number",
    price_range_order: "Minimum price should be less than maximum price",
    area_range_order: "Minimum area should be less than maximum area",
    filter_apply_failed: "Error applying filters",
    session_expired: "Session expired. Please login again.",
    property_not_found: "Property not found",
    otp_sent: "OTP has been sent to your phone",
    invalid_otp: "Invalid OTP. Please try again.",
};

static AR: Messages = Messages {
    invalid_number: "يجب أن يكون الرقم صالحًا وموجبًا",
    price_range_order: "يجب أن يكون الحد الأدنى للسعر أقل من الحد الأقصى",
    area_range_order: "يجب أن تكون المساحة الدنيا أقل من المساحة القصوى",
    filter_apply_failed: "حدث خطأ أثناء تطبيق الفلاتر",
    session_expired: "انتهت الجلسة. الرجاء تسجيل الدخول مرة أخرى",
    property_not_found: "العقار غير موجود",
    otp_sent: "تم إرسال رمز التحقق إلى هاتفك",
    invalid_otp: "رمز التحقق غير صالح. حاول مرة أخرى.",
};

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(m: &Messages) -> [&'static str; 8] {
        [
            m.invalid_number,
            m.price_range_order,
            m.area_range_order,
            m.filter_apply_failed,
            m.session_expired,
            m.property_not_found,
            m.otp_sent,
            m.invalid_otp,
        ]
    }

    #[test]
    fn both_locales_are_fully_populated() {
        for language in [Language::En, Language::Ar] {
            for text in fields(language.messages()) {
                assert!(!text.is_empty());
            }
        }
    }

    #[test]
    fn locales_are_distinct() {
        let en = fields(Language::En.messages());
        let ar = fields(Language::Ar.messages());
        for (e, a) in en.iter().zip(ar.iter()) {
            assert_ne!(e, a);
        }
    }

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!(Language::from_tag("AR"), Some(Language::Ar));
        assert_eq!(Language::from_tag(" en "), Some(Language::En));
        assert_eq!(Language::from_tag("fr"), None);
        assert_eq!(Language::default(), Language::En);
    }
}
