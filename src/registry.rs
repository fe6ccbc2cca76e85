use std::collections::HashMap;

use fake::faker::address::en::{
    BuildingNumber, CityName, CountryCode, CountryName, SecondaryAddress, StateName, StreetName,
    TimeZone, ZipCode,
};
use fake::faker::boolean::en::Boolean;
use fake::faker::chrono::en::{DateTime, DateTimeAfter, DateTimeBefore};
use fake::faker::color::en::{Color, HexColor, HslColor};
use fake::faker::company::en::{Bs, BsAdj, BsNoun, BsVerb, CatchPhrase, CompanyName};
use fake::faker::creditcard::en::CreditCardNumber;
use fake::faker::currency::en::{CurrencyCode, CurrencyName, CurrencySymbol};
use fake::faker::filesystem::en::{DirPath, FileExtension, FileName, FilePath, MimeType};
use fake::faker::finance::en::Bic;
use fake::faker::internet::en::{
    DomainSuffix, FreeEmail, IPv4, IPv6, MACAddress, Password, SafeEmail, UserAgent, Username,
};
use fake::faker::job::en as job;
use fake::faker::lorem::en::{Paragraph, Paragraphs, Sentence, Sentences, Word, Words};
use fake::faker::name::en::{FirstName, LastName, Name, Suffix, Title};
use fake::faker::number::en::Digit;
use fake::faker::phone_number::en::PhoneNumber;
use fake::uuid::UUIDv4;
use fake::Fake;

type Generator = Box<dyn Fn() -> String + Send + Sync>;

/// Methods that cannot be invoked without caller-supplied arguments. Matched
/// as substrings of the full `category.method` path.
const NEED_PARAMS: &[&str] = &[
    "between",
    "betweens",
    "helpers",
    "fromCharacters",
    "utilities",
    "setDefaultRefDate",
    "seed",
    "constructor",
    "getMetadata",
];

const MONTHS: &[&str] = &[
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];
const WEEKDAYS: &[&str] = &[
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE"];
const PROTOCOLS: &[&str] = &["http", "https"];

/// Typed outcome of resolving an invocation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Value(String),
    NeedParams,
    RandomizerUnsupported,
    Unsupported,
}

/// Explicit mapping from `category.method` paths to generator closures, built
/// once at startup. Replaces the reflection-style dispatch of the source page:
/// unknown keys resolve to a typed unsupported result instead of a runtime
/// lookup failure.
pub struct Registry {
    generators: HashMap<&'static str, Generator>,
}

impl Registry {
    pub fn new() -> Self {
        let mut registry = Self {
            generators: HashMap::new(),
        };
        registry.register_all();
        registry
    }

    /// Invoke a dotted path. Never fails: every outcome is a display string.
    pub fn invoke(&self, path: &str) -> String {
        match self.resolve(path) {
            Invocation::Value(v) => v,
            Invocation::NeedParams => "need params".to_string(),
            Invocation::RandomizerUnsupported => "randomizer not supported".to_string(),
            Invocation::Unsupported => format!("unsupported method, {}", path),
        }
    }

    pub fn resolve(&self, path: &str) -> Invocation {
        if path.contains("randomizer") {
            return Invocation::RandomizerUnsupported;
        }
        if NEED_PARAMS.iter().any(|kw| path.contains(kw)) {
            return Invocation::NeedParams;
        }
        match self.generators.get(path) {
            Some(generate) => Invocation::Value(generate()),
            None => Invocation::Unsupported,
        }
    }

    pub fn supported_paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.generators.keys().copied()
    }

    fn add(&mut self, path: &'static str, generate: impl Fn() -> String + Send + Sync + 'static) {
        self.generators.insert(path, Box::new(generate));
    }

    fn register_all(&mut self) {
        // ── person ──
        self.add("person.firstName", || FirstName().fake());
        self.add("person.lastName", || LastName().fake());
        self.add("person.fullName", || Name().fake());
        self.add("person.prefix", || Title().fake());
        self.add("person.suffix", || Suffix().fake());
        self.add("person.jobTitle", || job::Title().fake());
        self.add("person.jobArea", || job::Field().fake());
        self.add("person.jobType", || job::Position().fake());
        self.add("person.jobDescriptor", || job::Seniority().fake());

        // ── internet ──
        self.add("internet.email", || FreeEmail().fake());
        self.add("internet.exampleEmail", || SafeEmail().fake());
        self.add("internet.userName", || Username().fake());
        self.add("internet.username", || Username().fake());
        self.add("internet.domainSuffix", || DomainSuffix().fake());
        self.add("internet.domainName", || {
            let word: String = Username().fake::<String>().to_lowercase();
            let suffix: String = DomainSuffix().fake();
            format!("{}.{}", word, suffix)
        });
        self.add("internet.ip", || IPv4().fake());
        self.add("internet.ipv4", || IPv4().fake());
        self.add("internet.ipv6", || IPv6().fake());
        self.add("internet.mac", || MACAddress().fake());
        self.add("internet.password", || Password(10..17).fake());
        self.add("internet.userAgent", || UserAgent().fake());
        self.add("internet.httpMethod", || pick(HTTP_METHODS));
        self.add("internet.protocol", || pick(PROTOCOLS));
        self.add("internet.port", || (1024..65536u32).fake::<u32>().to_string());

        // ── location ──
        self.add("location.city", || CityName().fake());
        self.add("location.country", || CountryName().fake());
        self.add("location.countryCode", || CountryCode().fake());
        self.add("location.state", || StateName().fake());
        self.add("location.zipCode", || ZipCode().fake());
        self.add("location.buildingNumber", || BuildingNumber().fake());
        self.add("location.street", || StreetName().fake());
        self.add("location.streetAddress", || {
            let number: String = BuildingNumber().fake();
            let street: String = StreetName().fake();
            format!("{} {}", number, street)
        });
        self.add("location.secondaryAddress", || SecondaryAddress().fake());
        self.add("location.timeZone", || TimeZone().fake());
        self.add("location.latitude", || {
            format!("{:.4}", (-90.0..90.0).fake::<f64>())
        });
        self.add("location.longitude", || {
            format!("{:.4}", (-180.0..180.0).fake::<f64>())
        });

        // ── company ──
        self.add("company.name", || CompanyName().fake());
        self.add("company.catchPhrase", || CatchPhrase().fake());
        self.add("company.buzzPhrase", || Bs().fake());
        self.add("company.buzzAdjective", || BsAdj().fake());
        self.add("company.buzzNoun", || BsNoun().fake());
        self.add("company.buzzVerb", || BsVerb().fake());

        // ── phone ──
        self.add("phone.number", || PhoneNumber().fake());

        // ── lorem ──
        self.add("lorem.word", || Word().fake());
        self.add("lorem.words", || {
            Words(3..6).fake::<Vec<String>>().join(" ")
        });
        self.add("lorem.sentence", || Sentence(4..10).fake());
        self.add("lorem.sentences", || {
            Sentences(2..5).fake::<Vec<String>>().join(" ")
        });
        self.add("lorem.paragraph", || Paragraph(3..7).fake());
        self.add("lorem.paragraphs", || {
            Paragraphs(2..4).fake::<Vec<String>>().join("\n\n")
        });
        self.add("lorem.lines", || {
            Sentences(1..4).fake::<Vec<String>>().join("\n")
        });
        self.add("lorem.text", || Paragraph(2..6).fake());

        // ── finance ──
        self.add("finance.creditCardNumber", || CreditCardNumber().fake());
        self.add("finance.currencyCode", || CurrencyCode().fake());
        self.add("finance.currencyName", || CurrencyName().fake());
        self.add("finance.currencySymbol", || CurrencySymbol().fake());
        self.add("finance.bic", || Bic().fake());
        self.add("finance.amount", || {
            format!("{:.2}", (0.0..1000.0).fake::<f64>())
        });
        self.add("finance.pin", || digits(4));
        self.add("finance.accountNumber", || digits(8));
        self.add("finance.routingNumber", || digits(9));

        // ── color ──
        self.add("color.human", || Color().fake());
        self.add("color.rgb", || HexColor().fake());
        self.add("color.hsl", || HslColor().fake());

        // ── date ──
        self.add("date.anytime", || rfc3339(DateTime().fake()));
        self.add("date.past", || {
            rfc3339(DateTimeBefore(chrono::Utc::now()).fake())
        });
        self.add("date.recent", || {
            rfc3339(DateTimeBefore(chrono::Utc::now()).fake())
        });
        self.add("date.future", || {
            rfc3339(DateTimeAfter(chrono::Utc::now()).fake())
        });
        self.add("date.soon", || {
            rfc3339(DateTimeAfter(chrono::Utc::now()).fake())
        });
        self.add("date.month", || pick(MONTHS));
        self.add("date.weekday", || pick(WEEKDAYS));

        // ── string ──
        self.add("string.uuid", || UUIDv4.fake());
        self.add("string.numeric", || Digit().fake());
        self.add("string.sample", || Password(10..21).fake());

        // ── number ──
        self.add("number.int", || {
            (0..1_000_000i64).fake::<i64>().to_string()
        });
        self.add("number.float", || {
            format!("{:.4}", (0.0..1000.0).fake::<f64>())
        });
        self.add("number.hex", || {
            format!("{:x}", (0..u32::MAX).fake::<u32>())
        });

        // ── datatype ──
        self.add("datatype.boolean", || {
            Boolean(50).fake::<bool>().to_string()
        });

        // ── system ──
        self.add("system.fileName", || FileName().fake());
        self.add("system.filePath", || FilePath().fake());
        self.add("system.fileExt", || FileExtension().fake());
        self.add("system.directoryPath", || DirPath().fake());
        self.add("system.mimeType", || MimeType().fake());
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn pick(values: &[&str]) -> String {
    values[(0..values.len()).fake::<usize>()].to_string()
}

fn digits(count: usize) -> String {
    (0..count).map(|_| Digit().fake::<String>()).collect()
}

fn rfc3339(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.to_rfc3339()
}
