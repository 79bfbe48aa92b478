//! Model and provider display-name lookup
//!
//! The statistics engine ranks raw model/provider ids and asks a
//! `ModelCatalog` for presentable names. Lookups never fail: an unknown id
//! resolves to itself.

/// Resolved model metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModelInfo {
    pub(crate) name: String,
    /// Provider the model family belongs to, when known
    pub(crate) provider_id: Option<String>,
}

pub(crate) trait ModelCatalog: Sync {
    fn model(&self, id: &str) -> ModelInfo;
    fn provider_name(&self, id: &str) -> String;
}

struct Family {
    prefix: &'static str,
    display: &'static str,
    provider: &'static str,
    /// Prefix must be followed by a digit (`o3`, not `ollama`)
    needs_digit: bool,
}

const fn family(prefix: &'static str, display: &'static str, provider: &'static str) -> Family {
    Family {
        prefix,
        display,
        provider,
        needs_digit: false,
    }
}

const FAMILIES: &[Family] = &[
    family("claude-", "Claude ", "anthropic"),
    family("gpt-", "GPT-", "openai"),
    Family {
        needs_digit: true,
        ..family("o", "o", "openai")
    },
    family("gemini-", "Gemini ", "google"),
    family("grok-", "Grok ", "xai"),
    family("deepseek-", "DeepSeek ", "deepseek"),
    family("qwen", "Qwen", "alibaba"),
    family("kimi-", "Kimi ", "moonshotai"),
    family("glm-", "GLM-", "zhipuai"),
];

const PROVIDERS: &[(&str, &str)] = &[
    ("anthropic", "Anthropic"),
    ("openai", "OpenAI"),
    ("google", "Google"),
    ("xai", "xAI"),
    ("deepseek", "DeepSeek"),
    ("alibaba", "Alibaba"),
    ("moonshotai", "Moonshot AI"),
    ("zhipuai", "Zhipu AI"),
    ("openrouter", "OpenRouter"),
    ("github-copilot", "GitHub Copilot"),
    ("amazon-bedrock", "Amazon Bedrock"),
    ("opencode", "OpenCode"),
];

/// Catalog of well-known model families
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct BuiltinCatalog;

impl ModelCatalog for BuiltinCatalog {
    fn model(&self, id: &str) -> ModelInfo {
        let canonical = canonical_model_id(id);
        for family in FAMILIES {
            let Some(rest) = canonical.strip_prefix(family.prefix) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            if family.needs_digit && !rest.starts_with(|c: char| c.is_ascii_digit()) {
                continue;
            }
            return ModelInfo {
                name: format!("{}{}", family.display, render_tokens(rest)),
                provider_id: Some(family.provider.to_string()),
            };
        }
        ModelInfo {
            name: id.to_string(),
            provider_id: None,
        }
    }

    fn provider_name(&self, id: &str) -> String {
        let key = id.trim();
        PROVIDERS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(key))
            .map_or_else(|| id.to_string(), |(_, name)| (*name).to_string())
    }
}

/// Strip `provider/` routing prefixes, the Bedrock `anthropic.` prefix and a
/// trailing 8-digit date.
pub(crate) fn canonical_model_id(id: &str) -> String {
    let lower = id.trim().to_ascii_lowercase();
    let name = lower.rsplit('/').next().unwrap_or(&lower);
    let name = name.strip_prefix("anthropic.").unwrap_or(name);

    // Remove date suffix like -20251101
    if let Some(pos) = name.rfind('-') {
        let suffix = &name[pos + 1..];
        if suffix.len() == 8 && suffix.chars().all(|c| c.is_ascii_digit()) {
            return name[..pos].to_string();
        }
    }
    name.to_string()
}

/// `sonnet-4-5` -> `Sonnet 4.5`, `3-5-haiku` -> `3.5 Haiku`
fn render_tokens(rest: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut previous_numeric = false;
    for token in rest.split('-').filter(|t| !t.is_empty()) {
        let numeric = token.chars().all(|c| c.is_ascii_digit());
        if numeric && previous_numeric {
            if let Some(last) = words.last_mut() {
                last.push('.');
                last.push_str(token);
            }
        } else {
            words.push(capitalize(token));
        }
        previous_numeric = numeric;
    }
    words.join(" ")
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        }
        _ => token.to_string(),
    }
}
