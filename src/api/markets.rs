use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::{Error, Result};

use super::request::QueryValue;

macro_rules! markets {
    ($($code: ident => $name: literal),* $(,)?) => {
        /// ISO 3166-1 alpha-2 country code, used for the `country` and `market` parameters.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Market {
            $(
                #[doc = $name]
                $code,
            )*
        }

        impl Market {
            pub const ALL: &'static [Market] = &[$(Market::$code,)*];

            pub fn code(&self) -> &'static str {
                match self {
                    $(Market::$code => stringify!($code),)*
                }
            }

            /// English short name of the country.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Market::$code => $name,)*
                }
            }
        }

        impl FromStr for Market {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let code = s.trim().to_ascii_uppercase();
                Market::ALL
                    .iter()
                    .find(|m| m.code() == code)
                    .copied()
                    .ok_or_else(|| Error::encoding(format!("unknown ISO 3166-1 alpha-2 country code {s:?}")))
            }
        }
    };
}

markets! {
    AD => "Andorra",
    AE => "United Arab Emirates",
    AF => "Afghanistan",
    AG => "Antigua and Barbuda",
    AI => "Anguilla",
    AL => "Albania",
    AM => "Armenia",
    AO => "Angola",
    AQ => "Antarctica",
    AR => "Argentina",
    AS => "American Samoa",
    AT => "Austria",
    AU => "Australia",
    AW => "Aruba",
    AX => "Åland Islands",
    AZ => "Azerbaijan",
    BA => "Bosnia and Herzegovina",
    BB => "Barbados",
    BD => "Bangladesh",
    BE => "Belgium",
    BF => "Burkina Faso",
    BG => "Bulgaria",
    BH => "Bahrain",
    BI => "Burundi",
    BJ => "Benin",
    BL => "Saint Barthélemy",
    BM => "Bermuda",
    BN => "Brunei Darussalam",
    BO => "Bolivia, Plurinational State of",
    BQ => "Bonaire, Sint Eustatius and Saba",
    BR => "Brazil",
    BS => "Bahamas",
    BT => "Bhutan",
    BV => "Bouvet Island",
    BW => "Botswana",
    BY => "Belarus",
    BZ => "Belize",
    CA => "Canada",
    CC => "Cocos (Keeling) Islands",
    CD => "Congo, Democratic Republic of the",
    CF => "Central African Republic",
    CG => "Congo",
    CH => "Switzerland",
    CI => "Côte d'Ivoire",
    CK => "Cook Islands",
    CL => "Chile",
    CM => "Cameroon",
    CN => "China",
    CO => "Colombia",
    CR => "Costa Rica",
    CU => "Cuba",
    CV => "Cabo Verde",
    CW => "Curaçao",
    CX => "Christmas Island",
    CY => "Cyprus",
    CZ => "Czechia",
    DE => "Germany",
    DJ => "Djibouti",
    DK => "Denmark",
    DM => "Dominica",
    DO => "Dominican Republic",
    DZ => "Algeria",
    EC => "Ecuador",
    EE => "Estonia",
    EG => "Egypt",
    EH => "Western Sahara",
    ER => "Eritrea",
    ES => "Spain",
    ET => "Ethiopia",
    FI => "Finland",
    FJ => "Fiji",
    FK => "Falkland Islands (Malvinas)",
    FM => "Micronesia, Federated States of",
    FO => "Faroe Islands",
    FR => "France",
    GA => "Gabon",
    GB => "United Kingdom of Great Britain and Northern Ireland",
    GD => "Grenada",
    GE => "Georgia",
    GF => "French Guiana",
    GG => "Guernsey",
    GH => "Ghana",
    GI => "Gibraltar",
    GL => "Greenland",
    GM => "Gambia",
    GN => "Guinea",
    GP => "Guadeloupe",
    GQ => "Equatorial Guinea",
    GR => "Greece",
    GS => "South Georgia and the South Sandwich Islands",
    GT => "Guatemala",
    GU => "Guam",
    GW => "Guinea-Bissau",
    GY => "Guyana",
    HK => "Hong Kong",
    HM => "Heard Island and McDonald Islands",
    HN => "Honduras",
    HR => "Croatia",
    HT => "Haiti",
    HU => "Hungary",
    ID => "Indonesia",
    IE => "Ireland",
    IL => "Israel",
    IM => "Isle of Man",
    IN => "India",
    IO => "British Indian Ocean Territory",
    IQ => "Iraq",
    IR => "Iran, Islamic Republic of",
    IS => "Iceland",
    IT => "Italy",
    JE => "Jersey",
    JM => "Jamaica",
    JO => "Jordan",
    JP => "Japan",
    KE => "Kenya",
    KG => "Kyrgyzstan",
    KH => "Cambodia",
    KI => "Kiribati",
    KM => "Comoros",
    KN => "Saint Kitts and Nevis",
    KP => "Korea, Democratic People's Republic of",
    KR => "Korea, Republic of",
    KW => "Kuwait",
    KY => "Cayman Islands",
    KZ => "Kazakhstan",
    LA => "Lao People's Democratic Republic",
    LB => "Lebanon",
    LC => "Saint Lucia",
    LI => "Liechtenstein",
    LK => "Sri Lanka",
    LR => "Liberia",
    LS => "Lesotho",
    LT => "Lithuania",
    LU => "Luxembourg",
    LV => "Latvia",
    LY => "Libya",
    MA => "Morocco",
    MC => "Monaco",
    MD => "Moldova, Republic of",
    ME => "Montenegro",
    MF => "Saint Martin (French part)",
    MG => "Madagascar",
    MH => "Marshall Islands",
    MK => "North Macedonia",
    ML => "Mali",
    MM => "Myanmar",
    MN => "Mongolia",
    MO => "Macao",
    MP => "Northern Mariana Islands",
    MQ => "Martinique",
    MR => "Mauritania",
    MS => "Montserrat",
    MT => "Malta",
    MU => "Mauritius",
    MV => "Maldives",
    MW => "Malawi",
    MX => "Mexico",
    MY => "Malaysia",
    MZ => "Mozambique",
    NA => "Namibia",
    NC => "New Caledonia",
    NE => "Niger",
    NF => "Norfolk Island",
    NG => "Nigeria",
    NI => "Nicaragua",
    NL => "Netherlands, Kingdom of the",
    NO => "Norway",
    NP => "Nepal",
    NR => "Nauru",
    NU => "Niue",
    NZ => "New Zealand",
    OM => "Oman",
    PA => "Panama",
    PE => "Peru",
    PF => "French Polynesia",
    PG => "Papua New Guinea",
    PH => "Philippines",
    PK => "Pakistan",
    PL => "Poland",
    PM => "Saint Pierre and Miquelon",
    PN => "Pitcairn",
    PR => "Puerto Rico",
    PS => "Palestine, State of",
    PT => "Portugal",
    PW => "Palau",
    PY => "Paraguay",
    QA => "Qatar",
    RE => "Réunion",
    RO => "Romania",
    RS => "Serbia",
    RU => "Russian Federation",
    RW => "Rwanda",
    SA => "Saudi Arabia",
    SB => "Solomon Islands",
    SC => "Seychelles",
    SD => "Sudan",
    SE => "Sweden",
    SG => "Singapore",
    SH => "Saint Helena, Ascension and Tristan da Cunha",
    SI => "Slovenia",
    SJ => "Svalbard and Jan Mayen",
    SK => "Slovakia",
    SL => "Sierra Leone",
    SM => "San Marino",
    SN => "Senegal",
    SO => "Somalia",
    SR => "Suriname",
    SS => "South Sudan",
    ST => "Sao Tome and Principe",
    SV => "El Salvador",
    SX => "Sint Maarten (Dutch part)",
    SY => "Syrian Arab Republic",
    SZ => "Eswatini",
    TC => "Turks and Caicos Islands",
    TD => "Chad",
    TF => "French Southern Territories",
    TG => "Togo",
    TH => "Thailand",
    TJ => "Tajikistan",
    TK => "Tokelau",
    TL => "Timor-Leste",
    TM => "Turkmenistan",
    TN => "Tunisia",
    TO => "Tonga",
    TR => "Türkiye",
    TT => "Trinidad and Tobago",
    TV => "Tuvalu",
    TW => "Taiwan, Province of China",
    TZ => "Tanzania, United Republic of",
    UA => "Ukraine",
    UG => "Uganda",
    UM => "United States Minor Outlying Islands",
    US => "United States of America",
    UY => "Uruguay",
    UZ => "Uzbekistan",
    VA => "Holy See",
    VC => "Saint Vincent and the Grenadines",
    VE => "Venezuela, Bolivarian Republic of",
    VG => "Virgin Islands (British)",
    VI => "Virgin Islands (U.S.)",
    VN => "Viet Nam",
    VU => "Vanuatu",
    WF => "Wallis and Futuna",
    WS => "Samoa",
    YE => "Yemen",
    YT => "Mayotte",
    ZA => "South Africa",
    ZM => "Zambia",
    ZW => "Zimbabwe",
}

impl Display for Market {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl QueryValue for Market {
    fn to_query_value(&self) -> Result<String> {
        Ok(self.code().to_string())
    }
}

/// Language and country pair such as `es_MX`: an ISO 639-1 language code, an underscore
/// and an ISO 3166-1 alpha-2 country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    country: Market,
}

impl Locale {
    pub fn new<S: AsRef<str>>(language: S, country: Market) -> Result<Self> {
        let language = language.as_ref();
        if language.len() != 2 || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::encoding(format!(
                "invalid ISO 639-1 language code {language:?}"
            )));
        }
        Ok(Self {
            language: language.to_ascii_lowercase(),
            country,
        })
    }

    pub fn language(&self) -> &str {
        self.language.as_str()
    }

    pub fn country(&self) -> Market {
        self.country
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(|c: char| c == '_' || c == '-') {
            Some((language, country)) => Locale::new(language, country.parse()?),
            None => Err(Error::encoding(format!(
                "invalid locale {s:?}: expected `<language>_<COUNTRY>`, e.g. `es_MX`"
            ))),
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.language, self.country)
    }
}

impl QueryValue for Locale {
    fn to_query_value(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_codes() {
        assert_eq!(Market::US.to_string(), "US");
        assert_eq!("se".parse::<Market>().unwrap(), Market::SE);
        assert_eq!(Market::US.name(), "United States of America");
        assert!("XX".parse::<Market>().is_err());
        assert_eq!(Market::ALL.len(), 249);
    }

    #[test]
    fn locale_round_trip() {
        let locale: Locale = "es_MX".parse().unwrap();
        assert_eq!(locale.language(), "es");
        assert_eq!(locale.country(), Market::MX);
        assert_eq!(locale.to_string(), "es_MX");
        assert_eq!("EN-us".parse::<Locale>().unwrap().to_string(), "en_US");
    }

    #[test]
    fn invalid_locales() {
        assert!("english".parse::<Locale>().is_err());
        assert!("eng_US".parse::<Locale>().is_err());
        assert!("en_ZZ".parse::<Locale>().is_err());
    }
}
