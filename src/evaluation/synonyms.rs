//! Bilingual synonym table for KPI detection
//!
//! Keys are short canonical fragments of KPI names. A KPI name matches a key
//! when its lowercased form *contains* the key; the first key in declaration
//! order wins. Synonym entries are lowercase fragments tested as raw
//! substrings of the answer, so stems like "collaborat" or "johta" cover
//! every inflection.

/// Canonical key → synonym fragments, English and Finnish interleaved.
///
/// Order matters: more specific keys sit before broader ones that could
/// also be contained in the same KPI name.
const SYNONYM_ENTRIES: &[(&str, &[&str])] = &[
    (
        "leadership",
        &[
            "lead", "manage", "direct", "guide", "supervis", "coach", "mentor", "delegat",
            "johta", "ohjaa", "ohjas", "esimie", "valmenn", "delegoi",
        ],
    ),
    (
        "johtaminen",
        &[
            "johda", "johta", "ohjaa", "esimie", "vastuu", "lead", "manage", "direct",
        ],
    ),
    (
        "communication",
        &[
            "communicat", "present", "explain", "listen", "discuss", "inform", "report",
            "viestin", "kommunik", "esitt", "selit", "kuuntel", "keskustel", "tiedot",
        ],
    ),
    (
        "viestintä",
        &[
            "viesti", "kommunik", "esitt", "selit", "kuuntel", "keskustel", "communicat",
            "present", "explain",
        ],
    ),
    (
        "problem solving",
        &[
            "solve", "solution", "resolv", "troubleshoot", "analy", "root cause", "fix",
            "ratkais", "ongelm", "selvit", "analysoi", "korja",
        ],
    ),
    (
        "ongelmanratkaisu",
        &[
            "ratkais", "ongelm", "selvit", "analysoi", "korja", "solve", "solution", "resolv",
        ],
    ),
    (
        "teamwork",
        &[
            "team", "collaborat", "cooperat", "together", "colleague", "support",
            "tiimi", "yhteistyö", "yhdessä", "kollega", "tuki", "auttaa",
        ],
    ),
    (
        "tiimityö",
        &[
            "tiimi", "yhteistyö", "yhdessä", "kollega", "ryhmä", "team", "collaborat",
            "cooperat",
        ],
    ),
    (
        "collaboration",
        &[
            "collaborat", "cooperat", "partner", "team", "together",
            "yhteistyö", "yhdessä", "kumppan", "tiimi",
        ],
    ),
    (
        "customer",
        &[
            "customer", "client", "user", "service", "satisf",
            "asiaka", "asiakk", "palvel", "käyttäj", "tyytyv",
        ],
    ),
    (
        "asiakas",
        &[
            "asiaka", "asiakk", "palvel", "käyttäj", "tyytyv", "customer", "client",
        ],
    ),
    (
        "riski",
        &["riski", "uhka", "varautu", "vaara", "risk", "hazard", "mitigat"],
    ),
    (
        "risk",
        &[
            "risk", "hazard", "threat", "mitigat", "contingenc", "uncertaint",
            "riski", "uhka", "varautu", "vaara",
        ],
    ),
    (
        "quality",
        &[
            "quality", "standard", "accura", "review", "verif", "test", "audit",
            "laatu", "laadu", "tarkast", "testa", "auditoi",
        ],
    ),
    (
        "laatu",
        &["laatu", "laadu", "tarkast", "testa", "quality", "standard", "review"],
    ),
    (
        "time management",
        &[
            "prioriti", "schedul", "deadline", "on time", "plan", "organiz",
            "aikatau", "priorisoi", "määräai", "suunnit", "järjest",
        ],
    ),
    (
        "ajanhallinta",
        &[
            "aikatau", "priorisoi", "määräai", "suunnit", "järjest", "schedul", "deadline",
            "prioriti",
        ],
    ),
    (
        "planning",
        &[
            "plan", "roadmap", "strateg", "goal", "schedul",
            "suunnit", "tavoit", "strategi", "aikatau",
        ],
    ),
    (
        "innovation",
        &[
            "innovat", "creativ", "new idea", "improv", "experiment", "develop",
            "innovoi", "luova", "uusi idea", "kehit", "kokeil",
        ],
    ),
    (
        "adaptability",
        &[
            "adapt", "flexib", "change", "adjust", "learn",
            "sopeut", "jousta", "muutos", "muuto", "oppi",
        ],
    ),
    (
        "decision",
        &[
            "decid", "decision", "choose", "judgment", "evaluat",
            "päät", "valit", "harkin", "arvioi",
        ],
    ),
    (
        "negotiation",
        &[
            "negotiat", "agree", "compromis", "mediat", "persuad",
            "neuvottel", "sopi", "kompromis", "sovittel", "vakuut",
        ],
    ),
    (
        "conflict",
        &[
            "conflict", "dispute", "disagree", "mediat", "resolv",
            "konflikt", "riita", "erimielis", "sovittel",
        ],
    ),
    (
        "safety",
        &[
            "safety", "safe", "hazard", "protect", "secur",
            "turvall", "suojaa", "suojau", "työturv",
        ],
    ),
    (
        "budget",
        &[
            "budget", "cost", "expens", "financ", "saving",
            "budjet", "kustann", "kulu", "talou", "säästö",
        ],
    ),
    (
        "ethic",
        &[
            "ethic", "integrity", "honest", "fair", "responsib",
            "eetti", "rehelli", "reilu", "vastuulli", "oikeuden",
        ],
    ),
];

/// Lookup table from KPI names to synonym fragments
pub struct SynonymTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

static BUILTIN: SynonymTable = SynonymTable {
    entries: SYNONYM_ENTRIES,
};

impl SynonymTable {
    /// The built-in bilingual table
    pub fn builtin() -> &'static SynonymTable {
        &BUILTIN
    }

    /// Synonyms for the first key contained in the lowercased KPI name
    pub fn synonyms_for(&self, kpi_name: &str) -> &'static [&'static str] {
        let lowered = kpi_name.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| lowered.contains(key))
            .map(|(_, synonyms)| *synonyms)
            .unwrap_or(&[])
    }

    /// Canonical key that `kpi_name` resolves to, if any
    pub fn canonical_key(&self, kpi_name: &str) -> Option<&'static str> {
        let lowered = kpi_name.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| lowered.contains(key))
            .map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
