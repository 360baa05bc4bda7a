//! Built-in reference table data.
//!
//! These are the code tables shipped with the binary. Any of them can be
//! replaced at run time by a `name|code` file under the master directory's
//! `ref/` folder (see [`crate::lookup::RefTable::load`]); the file wins
//! wholesale when present.

/// Country name to regulator country code.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("Thailand", "0102100218"),
    ("Singapore", "0102100199"),
    ("Malaysia", "0102100131"),
    ("Japan", "0102100112"),
    ("China", "0102100045"),
    ("Hong Kong", "0102100097"),
    ("United States", "0102100227"),
    ("United Kingdom", "0102100226"),
    ("Germany", "0102100083"),
    ("France", "0102100077"),
    ("Australia", "0102100013"),
    ("South Korea", "0102100118"),
    ("Taiwan", "0102100213"),
    ("Vietnam", "0102100236"),
    ("India", "0102100101"),
];

/// Nationality name to regulator nationality code.
pub const NATIONALITIES: &[(&str, &str)] = &[
    ("Thai", "TH"),
    ("Singaporean", "SG"),
    ("Malaysian", "MY"),
    ("Japanese", "JP"),
    ("Chinese", "CN"),
    ("American", "US"),
    ("British", "GB"),
    ("German", "DE"),
    ("French", "FR"),
    ("Australian", "AU"),
    ("Korean", "KR"),
    ("Taiwanese", "TW"),
    ("Vietnamese", "VN"),
    ("Indian", "IN"),
];

/// Personal title to title code.
pub const TITLES: &[(&str, &str)] = &[
    ("Mr", "003"),
    ("Mrs", "004"),
    ("Miss", "005"),
    ("Ms", "012"),
    ("Dr", "026"),
    ("Professor", "035"),
    ("Police Lieutenant", "104"),
    ("Company Limited", "902"),
    ("Public Company Limited", "903"),
];

/// Bank full name to regulator short name.
pub const BANKS: &[(&str, &str)] = &[
    ("Bangkok Bank", "BBL"),
    ("Kasikornbank", "KBANK"),
    ("Krung Thai Bank", "KTB"),
    ("Siam Commercial Bank", "SCB"),
    ("Bank of Ayudhya", "BAY"),
    ("TMBThanachart Bank", "TTB"),
    ("Government Savings Bank", "GSB"),
    ("Kiatnakin Phatra Bank", "KKP"),
    ("CIMB Thai Bank", "CIMBT"),
    ("United Overseas Bank", "UOBT"),
];

/// Province / location name to regulator location code.
pub const LOCATIONS: &[(&str, &str)] = &[
    ("Bangkok", "10"),
    ("Nonthaburi", "12"),
    ("Pathum Thani", "13"),
    ("Samut Prakan", "11"),
    ("Chiang Mai", "50"),
    ("Chiang Rai", "57"),
    ("Khon Kaen", "40"),
    ("Nakhon Ratchasima", "30"),
    ("Chon Buri", "20"),
    ("Phuket", "83"),
    ("Songkhla", "90"),
];

/// Business type description to regulator business type code.
pub const BUSINESS_TYPES: &[(&str, &str)] = &[
    ("Agriculture", "A01"),
    ("Manufacturing", "C01"),
    ("Construction", "F01"),
    ("Wholesale and Retail Trade", "G01"),
    ("Transportation", "H01"),
    ("Accommodation and Food Service", "I01"),
    ("Information and Communication", "J01"),
    ("Financial and Insurance", "K01"),
    ("Real Estate", "L01"),
    ("Professional Services", "M01"),
    ("Education", "P01"),
    ("Health and Social Work", "Q01"),
];
