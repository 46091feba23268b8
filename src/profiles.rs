//! Topic profiles: the immutable configuration bundles that parameterize
//! newsletter jobs.
//!
//! A profile carries everything that used to be duplicated per topic:
//! query shards for the news-search fan-out, the keyword weight lists the
//! ranker scores with, the keyword→category map for local categorization,
//! the curator persona for the LLM system prompt, and the canned fallback
//! summary. One generic job runs against any profile.
//!
//! Two registries exist: daily topics and weekly topics. The orchestrator
//! matches active topic registry rows to profiles case-insensitively by
//! name.

use once_cell::sync::Lazy;

/// How often a topic's newsletter is produced, and which store target
/// its rows go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// One-day window, `newsletters` table, subscriber snapshot attached.
    Daily,
    /// Seven-day window, `weekly_newsletter` table, key highlight attached.
    Weekly,
}

/// The immutable per-topic configuration bundle.
#[derive(Debug)]
pub struct TopicProfile {
    /// Topic name; matched case-insensitively against the topic registry.
    pub name: &'static str,
    pub cadence: Cadence,
    /// Disjunctive search strings submitted to the news-search API, one
    /// request per shard.
    pub query_shards: &'static [&'static str],
    /// `pageSize` parameter per shard request.
    pub page_size: u32,
    /// Terms counted with weight 2 by the ranker.
    pub priority_terms: &'static [&'static str],
    /// Known-entity terms counted with weight 1.
    pub entity_terms: &'static [&'static str],
    /// Ambient topic terms counted with weight 1. Empty for topics that
    /// only define two lists.
    pub ambient_terms: &'static [&'static str],
    /// Keyword→category map for local per-article categorization.
    pub categories: &'static [(&'static str, &'static [&'static str])],
    /// Curator persona paragraph for the LLM system prompt.
    pub persona: &'static str,
    /// Deterministic summary used when the LLM omits one or the fallback
    /// path runs.
    pub fallback_summary: &'static str,
    /// Science-only: dedupe with an approximate similarity test instead of
    /// exact fingerprint equality, to catch wire-story variants.
    pub fuzzy_dedupe: bool,
}

impl TopicProfile {
    /// Category assigned to articles that match nothing in the map.
    pub fn default_category(&self) -> String {
        format!("General {} News", self.name)
    }
}

/// Daily topic profiles, keyed by registry name.
pub static DAILY_PROFILES: Lazy<Vec<TopicProfile>> = Lazy::new(|| {
    vec![
        TopicProfile {
            name: "AI",
            cadence: Cadence::Daily,
            query_shards: &[
                "AI breakthrough OR AI advancement",
                "LLM OR large language model OR GPT",
                "AI ethics OR AI alignment OR AI safety",
                "AI research OR AI conference",
                "AI application OR AI use case",
                "AI in healthcare OR AI in finance OR AI in education",
                "AI robotics OR autonomous systems OR computer vision",
                "OpenAI OR DeepMind OR Google AI OR Microsoft AI OR Anthropic",
            ],
            page_size: 20,
            priority_terms: &[
                "llm", "large language model", "gpt", "generative ai", "genai",
                "openai", "anthropic", "deepmind", "google ai", "microsoft ai",
                "ai research", "ai ethics", "ai alignment", "ai safety",
                "transformer model", "foundation model", "multimodal ai",
                "few-shot learning", "zero-shot learning", "prompt engineering",
            ],
            entity_terms: &[
                "openai", "anthropic", "deepmind", "google", "microsoft",
                "meta", "nvidia", "ibm", "hugging face", "ai21 labs",
                "cohere", "stability ai", "midjourney", "inflection ai",
                "amazon", "apple", "baidu", "tesla", "intel", "sensetime",
                "databricks", "scale ai", "runway", "mistral",
            ],
            ambient_terms: &[],
            categories: &[
                ("AI Research & Development", &["research", "development", "breakthrough", "innovation", "paper", "study"]),
                ("Industry News", &["company", "startup", "investment", "partnership", "product launch"]),
                ("AI Applications", &["application", "use case", "implementation", "deployment", "in healthcare", "in finance"]),
                ("Ethics & Governance", &["ethics", "governance", "regulation", "policy", "bias", "fairness"]),
                ("GenAI & LLMs", &["generative ai", "llm", "language model", "gpt", "transformer"]),
                ("Robotics & Autonomous Systems", &["robotics", "autonomous", "robot", "self-driving"]),
                ("AI Hardware", &["chip", "processor", "tpu", "gpu", "quantum computing"]),
            ],
            persona: "You are an AI news curator specializing in AI technology news. \
                      Focus on significant developments in generative AI and foundation \
                      models, big tech AI initiatives, AI ethics and regulation, and \
                      breakthrough AI research and applications.",
            fallback_summary: "Compilation of the latest developments in AI technology and research.",
            fuzzy_dedupe: false,
        },
        TopicProfile {
            name: "Business",
            cadence: Cadence::Daily,
            query_shards: &[
                "stock market OR earnings report OR IPO",
                "merger OR acquisition OR venture capital",
                "startup funding OR unicorn valuation",
                "Federal Reserve OR interest rates OR inflation",
                "economy OR recession OR GDP growth",
                "tech industry OR big tech earnings",
            ],
            page_size: 20,
            priority_terms: &[
                "earnings", "ipo", "merger", "acquisition", "venture capital",
                "funding round", "valuation", "interest rates", "inflation",
                "federal reserve", "stock market", "recession",
            ],
            entity_terms: &[
                "apple", "microsoft", "amazon", "google", "meta", "tesla",
                "nvidia", "goldman sachs", "jpmorgan", "blackrock",
                "berkshire hathaway", "sequoia", "a16z", "softbank",
            ],
            ambient_terms: &[
                "economy", "markets", "investors", "shares", "quarterly",
                "revenue", "profit", "growth", "startup",
            ],
            categories: &[
                ("Markets & Trading", &["stock", "shares", "market", "trading", "index"]),
                ("Deals & Funding", &["merger", "acquisition", "funding", "ipo", "venture"]),
                ("Economy & Policy", &["fed", "inflation", "interest rate", "gdp", "economy", "policy"]),
                ("Corporate News", &["earnings", "revenue", "ceo", "layoffs", "quarterly"]),
            ],
            persona: "You are a business news curator covering markets, deals, corporate \
                      earnings, and macroeconomic policy. Prioritize market-moving stories \
                      and significant corporate developments.",
            fallback_summary: "Roundup of the latest business, markets, and economy news.",
            fuzzy_dedupe: false,
        },
        TopicProfile {
            name: "Science",
            cadence: Cadence::Daily,
            query_shards: &[
                "scientific discovery OR research breakthrough",
                "physics OR quantum OR particle accelerator",
                "biology OR genetics OR CRISPR",
                "climate science OR climate research",
                "space exploration OR NASA OR ESA OR CERN",
                "neuroscience OR brain research",
            ],
            page_size: 20,
            priority_terms: &[
                "discovery", "breakthrough", "peer-reviewed", "study finds",
                "quantum", "crispr", "genome", "particle", "fusion",
                "climate change", "neuroscience", "vaccine",
            ],
            entity_terms: &[
                "nasa", "esa", "cern", "nih", "mit", "stanford", "harvard",
                "max planck", "nature", "science journal", "royal society",
                "noaa", "who",
            ],
            ambient_terms: &[],
            categories: &[
                ("Physics & Space", &["physics", "quantum", "particle", "telescope", "astronomy"]),
                ("Biology & Medicine", &["biology", "genetics", "crispr", "vaccine", "clinical"]),
                ("Climate & Environment", &["climate", "emissions", "warming", "environment"]),
                ("Research News", &["study", "research", "paper", "journal", "peer-reviewed"]),
            ],
            persona: "You are a science news curator covering peer-reviewed research, \
                      major discoveries, and developments across physics, biology, \
                      climate science, and medicine. Prefer primary research over \
                      commentary.",
            fallback_summary: "Digest of the latest scientific discoveries and research news.",
            // Wire-service science stories circulate in near-identical
            // variants, so this topic dedupes by similarity instead of
            // exact fingerprint.
            fuzzy_dedupe: true,
        },
        TopicProfile {
            name: "Health",
            cadence: Cadence::Daily,
            query_shards: &[
                "health study OR medical research",
                "nutrition OR diet OR exercise science",
                "mental health OR psychology research",
                "public health OR disease outbreak",
                "longevity OR aging research",
            ],
            page_size: 20,
            priority_terms: &[
                "clinical trial", "medical research", "public health",
                "mental health", "nutrition", "longevity", "vaccine",
                "treatment", "diagnosis",
            ],
            entity_terms: &[
                "who", "cdc", "fda", "nih", "mayo clinic", "johns hopkins",
                "pfizer", "moderna", "novo nordisk", "lancet",
            ],
            ambient_terms: &[
                "health", "wellness", "disease", "patients", "doctors",
                "hospital", "therapy",
            ],
            categories: &[
                ("Medical Research", &["study", "trial", "research", "treatment"]),
                ("Nutrition & Fitness", &["nutrition", "diet", "exercise", "fitness"]),
                ("Mental Health", &["mental health", "psychology", "anxiety", "depression"]),
                ("Public Health", &["outbreak", "public health", "vaccine", "epidemic"]),
            ],
            persona: "You are a health news curator covering medical research, nutrition, \
                      mental health, and public health. Prefer evidence-backed reporting \
                      over lifestyle commentary.",
            fallback_summary: "Summary of the latest health and medical research news.",
            fuzzy_dedupe: false,
        },
        TopicProfile {
            name: "Space",
            cadence: Cadence::Daily,
            query_shards: &[
                "rocket launch OR satellite deployment",
                "NASA mission OR ESA mission",
                "SpaceX OR Blue Origin OR Rocket Lab",
                "Mars OR Moon OR lunar mission",
                "astronomy OR exoplanet OR James Webb",
            ],
            page_size: 20,
            priority_terms: &[
                "launch", "mission", "orbit", "lander", "rover",
                "exoplanet", "telescope", "crewed", "docking", "satellite",
            ],
            entity_terms: &[
                "nasa", "spacex", "esa", "blue origin", "rocket lab",
                "roscosmos", "isro", "jaxa", "boeing", "lockheed martin",
                "james webb", "hubble",
            ],
            ambient_terms: &[],
            categories: &[
                ("Launches & Missions", &["launch", "mission", "rocket", "payload"]),
                ("Astronomy", &["telescope", "exoplanet", "galaxy", "astronomy", "star"]),
                ("Commercial Space", &["spacex", "blue origin", "commercial", "starlink"]),
                ("Exploration", &["mars", "moon", "lunar", "rover", "lander"]),
            ],
            persona: "You are a space news curator covering launches, missions, astronomy, \
                      and the commercial space industry. Prioritize mission milestones and \
                      significant observations.",
            fallback_summary: "Roundup of the latest space exploration and astronomy news.",
            fuzzy_dedupe: false,
        },
    ]
});

/// Weekly topic profiles, keyed by the weekly registry's names.
pub static WEEKLY_PROFILES: Lazy<Vec<TopicProfile>> = Lazy::new(|| {
    vec![
        TopicProfile {
            name: "AI & Tech Weekly",
            cadence: Cadence::Weekly,
            query_shards: &[
                "AI industry week OR AI roundup",
                "major AI announcement OR AI product launch",
                "AI funding OR AI acquisition",
                "tech industry OR semiconductor",
            ],
            page_size: 20,
            priority_terms: &[
                "llm", "generative ai", "foundation model", "ai chip",
                "ai funding", "ai acquisition", "ai launch",
            ],
            entity_terms: &[
                "openai", "anthropic", "google", "microsoft", "meta",
                "nvidia", "amazon", "apple", "mistral", "hugging face",
            ],
            ambient_terms: &[],
            categories: &[
                ("GenAI & LLMs", &["generative ai", "llm", "language model", "gpt"]),
                ("Industry Moves", &["funding", "acquisition", "partnership", "launch"]),
                ("Hardware", &["chip", "gpu", "semiconductor", "datacenter"]),
            ],
            persona: "You are a technology editor assembling a weekly AI and tech digest. \
                      Select the stories that defined the week rather than incremental \
                      updates.",
            fallback_summary: "The week's most significant AI and technology developments.",
            fuzzy_dedupe: false,
        },
        TopicProfile {
            name: "Crypto & Blockchain Weekly",
            cadence: Cadence::Weekly,
            query_shards: &[
                "bitcoin OR ethereum OR cryptocurrency",
                "blockchain OR DeFi OR stablecoin",
                "crypto regulation OR SEC crypto",
            ],
            page_size: 20,
            priority_terms: &[
                "bitcoin", "ethereum", "stablecoin", "defi", "etf",
                "crypto regulation", "halving",
            ],
            entity_terms: &[
                "coinbase", "binance", "sec", "tether", "circle",
                "blackrock", "microstrategy",
            ],
            ambient_terms: &[],
            categories: &[
                ("Markets", &["price", "etf", "rally", "selloff"]),
                ("Regulation", &["sec", "regulation", "lawsuit", "compliance"]),
                ("Technology", &["protocol", "upgrade", "layer 2", "smart contract"]),
            ],
            persona: "You are a financial editor assembling a weekly crypto and blockchain \
                      digest. Focus on market structure, regulation, and protocol news.",
            fallback_summary: "The week's most significant crypto and blockchain developments.",
            fuzzy_dedupe: false,
        },
        TopicProfile {
            name: "Startup Weekly",
            cadence: Cadence::Weekly,
            query_shards: &[
                "startup funding OR seed round OR series A",
                "venture capital OR startup acquisition",
                "unicorn OR startup valuation",
            ],
            page_size: 20,
            priority_terms: &[
                "seed round", "series a", "series b", "funding", "valuation",
                "acquisition", "unicorn", "accelerator",
            ],
            entity_terms: &[
                "y combinator", "sequoia", "a16z", "accel", "benchmark",
                "techcrunch", "softbank",
            ],
            ambient_terms: &[],
            categories: &[
                ("Funding Rounds", &["seed", "series", "raised", "funding"]),
                ("Exits", &["acquisition", "acquired", "ipo", "exit"]),
                ("Ecosystem", &["accelerator", "incubator", "venture", "founders"]),
            ],
            persona: "You are a startup editor assembling a weekly digest of funding \
                      rounds, exits, and ecosystem news. Prioritize notable rounds and \
                      acquisitions.",
            fallback_summary: "The week's most significant startup funding and exit news.",
            fuzzy_dedupe: false,
        },
    ]
});

/// Find the daily profile whose name matches `name`, case-insensitively.
pub fn find_daily(name: &str) -> Option<&'static TopicProfile> {
    DAILY_PROFILES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Find the weekly profile whose name matches `name`, case-insensitively.
pub fn find_weekly(name: &str) -> Option<&'static TopicProfile> {
    WEEKLY_PROFILES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_daily_case_insensitive() {
        assert!(find_daily("ai").is_some());
        assert!(find_daily("AI").is_some());
        assert!(find_daily("science").is_some());
        assert!(find_daily("knitting").is_none());
    }

    #[test]
    fn test_find_weekly() {
        assert!(find_weekly("ai & tech weekly").is_some());
        assert!(find_weekly("AI").is_none());
    }

    #[test]
    fn test_only_science_uses_fuzzy_dedupe() {
        for p in DAILY_PROFILES.iter() {
            assert_eq!(p.fuzzy_dedupe, p.name == "Science", "profile {}", p.name);
        }
        for p in WEEKLY_PROFILES.iter() {
            assert!(!p.fuzzy_dedupe, "profile {}", p.name);
        }
    }

    #[test]
    fn test_profiles_are_well_formed() {
        for p in DAILY_PROFILES.iter().chain(WEEKLY_PROFILES.iter()) {
            assert!(!p.query_shards.is_empty(), "profile {} has no shards", p.name);
            assert!(!p.priority_terms.is_empty(), "profile {} has no priority terms", p.name);
            assert!(!p.categories.is_empty(), "profile {} has no categories", p.name);
            assert!(p.page_size > 0);
            // Terms are matched against lowercased article text.
            for term in p.priority_terms.iter().chain(p.entity_terms).chain(p.ambient_terms) {
                assert_eq!(*term, term.to_lowercase(), "profile {} term {:?}", p.name, term);
            }
        }
    }

    #[test]
    fn test_default_category_names_the_topic() {
        let p = find_daily("Space").unwrap();
        assert_eq!(p.default_category(), "General Space News");
    }
}
