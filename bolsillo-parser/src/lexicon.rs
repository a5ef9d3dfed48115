//! Keyword and pattern tables the detectors scan against.
//!
//! Every table is an ordered list: detectors return the first entry that
//! matches, so declaration order is the match-priority contract. Keep more
//! specific entries above the generic ones that contain them.

use bolsillo_core::{CoreError, Currency};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Substrings that mark a command as income.
pub const INCOME_TRIGGERS: &[&str] = &[
    "recibí",
    "recibi",
    "me pagaron",
    "me depositaron",
    "me transfirieron",
    "cobré",
    "gané",
    "ingreso",
    "ingresó",
    "sueldo",
    "salario",
    "quincena",
    "vendí",
    "vendi",
];

/// Substrings that mark a command as an expense. Detection never needs
/// these (expense is the default); they only make the type explicit.
pub const EXPENSE_TRIGGERS: &[&str] = &[
    "gasté", "gaste", "gasto", "pagué", "pague", "pago", "compré", "compre", "compra", "transferí",
];

/// A static category: registry id, display label, and its keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub id: &'static str,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        id: "food",
        label: "Comida",
        keywords: &[
            "comida", "café", "cafe", "desayuno", "almuerzo", "cena", "restaurante",
            "supermercado", "mercado", "pizza", "hamburguesa", "panadería", "arepa", "empanada",
        ],
    },
    CategoryRule {
        id: "transport",
        label: "Transporte",
        keywords: &[
            "taxi", "transporte", "gasolina", "uber", "autobús", "metro", "pasaje",
            "estacionamiento", "peaje",
        ],
    },
    CategoryRule {
        id: "services",
        label: "Servicios",
        keywords: &[
            "luz", "agua", "internet", "teléfono", "telefono", "celular", "cantv",
            "electricidad", "condominio",
        ],
    },
    CategoryRule {
        id: "entertainment",
        label: "Entretenimiento",
        keywords: &["cine", "netflix", "spotify", "fiesta", "concierto", "juego"],
    },
    CategoryRule {
        id: "health",
        label: "Salud",
        keywords: &[
            "farmacia", "medicina", "médico", "medico", "doctor", "consulta", "hospital", "clínica",
        ],
    },
    CategoryRule {
        id: "shopping",
        label: "Compras",
        keywords: &["ropa", "zapatos", "camisa", "pantalón", "tienda"],
    },
    CategoryRule {
        id: "education",
        label: "Educación",
        keywords: &["colegio", "universidad", "curso", "libro", "matrícula"],
    },
    CategoryRule {
        id: "home",
        label: "Hogar",
        keywords: &["alquiler", "mueble", "limpieza"],
    },
    CategoryRule {
        id: "salary",
        label: "Salario",
        keywords: &["salario", "sueldo", "quincena", "nómina"],
    },
    CategoryRule {
        id: "freelance",
        label: "Freelance",
        keywords: &["freelance", "proyecto", "cliente"],
    },
    CategoryRule {
        id: "investments",
        label: "Inversiones",
        keywords: &["inversión", "dividendo", "intereses"],
    },
    CategoryRule {
        id: "gifts",
        label: "Regalos",
        keywords: &["regalo"],
    },
];

/// Display label for a static category id.
pub fn category_label(id: &str) -> Option<&'static str> {
    CATEGORY_RULES.iter().find(|r| r.id == id).map(|r| r.label)
}

/// Spelled-out amounts. Multi-word entries sit above the bare `mil` /
/// `millón` they contain.
pub const MAGNITUDE_WORDS: &[(&str, f64)] = &[
    ("un millón", 1_000_000.0),
    ("un millon", 1_000_000.0),
    ("dos millones", 2_000_000.0),
    ("millón", 1_000_000.0),
    ("millon", 1_000_000.0),
    ("quinientos mil", 500_000.0),
    ("doscientos mil", 200_000.0),
    ("cien mil", 100_000.0),
    ("cincuenta mil", 50_000.0),
    ("veinte mil", 20_000.0),
    ("quince mil", 15_000.0),
    ("diez mil", 10_000.0),
    ("cinco mil", 5_000.0),
    ("tres mil", 3_000.0),
    ("dos mil", 2_000.0),
    ("mil", 1_000.0),
];

/// Currency indicators, checked in this order against lowercased text.
/// Codes may be glued to the number (`20bs`, `50usd`) but not to a letter
/// (`absurdo`).
pub const CURRENCY_PATTERNS: &[(&str, Currency)] = &[
    (r"d[oó]lar(?:es)?|\$", Currency::Usd),
    (r"(?:^|[^\p{L}])usd\b", Currency::Usd),
    (r"bol[ií]var(?:es)?|\bbolos?\b", Currency::Ves),
    (r"(?:^|[^\p{L}])bs\b", Currency::Ves),
    (r"(?:^|[^\p{L}])ves\b", Currency::Ves),
    (r"(?:^|[^\p{L}])usdt\b|tether", Currency::Usdt),
    (r"(?:^|[^\p{L}])usdc\b", Currency::Usdc),
];

/// Compile a pattern from the literal tables in this crate.
pub(crate) fn literal(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid table pattern {pattern:?}: {e}"))
}

/// One user-configurable account and the keywords that identify it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountEntry {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered keyword → account table. Replaced wholesale when the user edits
/// their bank names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<AccountEntry>", into = "Vec<AccountEntry>")]
pub struct AccountTable {
    entries: Vec<AccountEntry>,
}

impl Default for AccountTable {
    fn default() -> Self {
        let defaults: &[(&str, &[&str])] = &[
            ("banesco", &["banesco"]),
            ("mercantil", &["mercantil"]),
            ("provincial", &["provincial", "bbva"]),
            ("venezuela", &["banco de venezuela", "bdv"]),
            ("bnc", &["bnc", "nacional de crédito"]),
            ("bancamiga", &["bancamiga"]),
            ("binance", &["binance"]),
            ("zelle", &["zelle"]),
            ("paypal", &["paypal"]),
            ("efectivo", &["efectivo", "cash"]),
        ];
        Self {
            entries: defaults
                .iter()
                .map(|(name, kws)| AccountEntry {
                    name: name.to_string(),
                    keywords: kws.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl TryFrom<Vec<AccountEntry>> for AccountTable {
    type Error = CoreError;

    fn try_from(entries: Vec<AccountEntry>) -> Result<Self, Self::Error> {
        Self::new(entries.into_iter().map(|e| (e.name, e.keywords)))
    }
}

impl From<AccountTable> for Vec<AccountEntry> {
    fn from(table: AccountTable) -> Self {
        table.entries
    }
}

impl AccountTable {
    /// Build a table from `(account name, keywords)` pairs, keeping order.
    ///
    /// Keywords are trimmed and lowercased; blanks are dropped. An account
    /// left with no keywords is rejected.
    pub fn new<N, K, S>(pairs: impl IntoIterator<Item = (N, K)>) -> Result<Self, CoreError>
    where
        N: Into<String>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (name, keywords) in pairs {
            let name = name.into().trim().to_string();
            let keywords: Vec<String> = keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if name.is_empty() || keywords.is_empty() {
                return Err(CoreError::InvalidAccount(name));
            }
            entries.push(AccountEntry { name, keywords });
        }
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn entries(&self) -> &[AccountEntry] {
        &self.entries
    }

    /// Replace an account's keywords in place, or append it.
    pub fn upsert(&mut self, entry: AccountEntry) -> Result<(), CoreError> {
        let validated = Self::new([(entry.name, entry.keywords)])?;
        let Some(entry) = validated.entries.into_iter().next() else {
            return Ok(());
        };
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => existing.keywords = entry.keywords,
            None => self.entries.push(entry),
        }
        Ok(())
    }

    /// Returns true if an entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    /// First account whose keyword is a substring of `lowered`.
    pub(crate) fn find(&self, lowered: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.keywords.iter().any(|k| lowered.contains(k.as_str())))
            .map(|e| e.name.as_str())
    }
}

/// The full set of tables one parse runs against.
#[derive(Debug, Clone)]
pub struct Lexicon {
    currency_patterns: Vec<(Regex, Currency)>,
    accounts: AccountTable,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(AccountTable::default())
    }
}

impl Lexicon {
    pub fn new(accounts: AccountTable) -> Self {
        let currency_patterns = CURRENCY_PATTERNS
            .iter()
            .map(|(p, c)| (literal(p), *c))
            .collect();
        Self {
            currency_patterns,
            accounts,
        }
    }

    /// Same tables, different account keywords.
    pub fn with_accounts(&self, accounts: AccountTable) -> Self {
        Self {
            currency_patterns: self.currency_patterns.clone(),
            accounts,
        }
    }

    pub fn accounts(&self) -> &AccountTable {
        &self.accounts
    }

    pub(crate) fn currency_patterns(&self) -> &[(Regex, Currency)] {
        &self.currency_patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_table_patterns_compile() {
        for (pattern, _) in CURRENCY_PATTERNS {
            assert!(Regex::new(pattern).is_ok(), "{pattern}");
        }
        for (word, _) in MAGNITUDE_WORDS {
            let pattern = format!(r"\b{}\b", regex::escape(word));
            assert!(Regex::new(&pattern).is_ok(), "{pattern}");
        }
        let lex = Lexicon::default();
        assert_eq!(lex.currency_patterns().len(), CURRENCY_PATTERNS.len());
        crate::amount::AmountExtractor::new();
        crate::segment::split_segments("5 en taxi y 3 en pan");
    }

    #[test]
    fn test_magnitude_specific_before_generic() {
        let pos = |w: &str| MAGNITUDE_WORDS.iter().position(|(k, _)| *k == w).unwrap();
        assert!(pos("diez mil") < pos("mil"));
        assert!(pos("cien mil") < pos("mil"));
        assert!(pos("millón") < pos("mil"));
        assert!(pos("un millón") < pos("millón"));
    }

    #[test]
    fn test_account_table_normalizes_keywords() {
        let table = AccountTable::new([("Banesco", vec!["  BANESCO ", ""])]).unwrap();
        assert_eq!(table.entries()[0].keywords, vec!["banesco".to_string()]);
        assert_eq!(table.find("20 de banesco"), Some("Banesco"));
    }

    #[test]
    fn test_account_table_rejects_empty_keywords() {
        let err = AccountTable::new([("vacía", Vec::<String>::new())]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidAccount(name) if name == "vacía"));
    }

    #[test]
    fn test_account_upsert_and_remove() {
        let mut table = AccountTable::default();
        table
            .upsert(AccountEntry {
                name: "banesco".to_string(),
                keywords: vec!["bane".to_string()],
            })
            .unwrap();
        assert_eq!(table.find("pagué con bane"), Some("banesco"));
        assert!(table.remove("banesco"));
        assert!(!table.remove("banesco"));
        assert_eq!(table.find("pagué con bane"), None);
    }

    #[test]
    fn test_account_table_deserialize_validates() {
        let table: AccountTable =
            serde_json::from_str(r#"[{"name":"bdv","keywords":["BDV","Banco de Venezuela"]}]"#)
                .unwrap();
        assert_eq!(table.entries()[0].keywords, vec!["bdv", "banco de venezuela"]);

        let bad = serde_json::from_str::<AccountTable>(r#"[{"name":"x","keywords":[]}]"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("transport"), Some("Transporte"));
        assert_eq!(category_label("pets"), None);
    }
}
