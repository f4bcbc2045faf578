// src/prompts.rs
//! Prompts sent to the grounded model. Both ask for `---`-terminated blocks
//! that `blocks::parse_structured_blocks` understands.

use crate::cache::Category;

pub const NEWS_PROMPT: &str = "\
You are a news scout covering Azure AI Foundry.
Use web search. Find the 5 most recent, credible news items about Azure AI Foundry \
(product announcements, major partnerships, GA or preview updates).

Return EXACTLY 5 entries formatted as blocks:
Headline: <max 10 words>
Summary: <2-3 neutral, specific, concise sentences>
Link: <direct URL>
---

Rules:
- Prefer official Microsoft sources, reputable tech media and engineering blogs.
- No speculation; only verifiable information.
- Avoid duplicates; every entry must be a distinct item.
- If fewer than 5 truly recent items exist, backfill with the most impactful items from the last 6 months.";

pub const IMPROVEMENTS_PROMPT: &str = "\
You are a documentation analyst for Azure AI Foundry.
Use web search to read official Microsoft documentation, release notes and engineering blogs.

Task:
Extract the 5 most relevant recent TECHNICAL improvements (features or changes) for developers \
using Azure AI Foundry.

Format EXACTLY like:
Headline: <feature or change in about 8 words>
Summary: <2-3 sentences on what changed and the impact on developers>
Link: <deep link to the source doc or release note>
Why it matters: <short phrase on the developer benefit>
---

Rules:
- Prioritize learn.microsoft.com, azure.microsoft.com pages and Azure Updates.
- Be precise: name APIs, SDKs, regions, quotas and GA/preview labels when available.
- Avoid marketing language.";

pub fn prompt_for(category: Category) -> &'static str {
    match category {
        Category::News => NEWS_PROMPT,
        Category::Improvements => IMPROVEMENTS_PROMPT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_ask_for_parseable_blocks() {
        for c in Category::ALL {
            let p = prompt_for(c);
            assert!(p.contains("Headline:") && p.contains("Link:") && p.contains("---"));
        }
        assert!(prompt_for(Category::Improvements).contains("Why it matters:"));
        assert!(!prompt_for(Category::News).contains("Why it matters:"));
    }
}
