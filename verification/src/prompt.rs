//! Prompt sent to the external verdict provider.

/// Build the fixed-template prompt asking for a verdict on `text`.
pub fn build_prompt(text: &str) -> String {
    format!(
        "You are an assistant that evaluates whether a piece of content is likely to be \
misinformation. For the following content, provide:\n\
1) a short verdict: \"Likely True\" / \"Likely Misleading\" / \"Unverified\" / \"Likely False\";\n\
2) a confidence score 0-100;\n\
3) 3 concise reasons explaining why;\n\
4) suggestions for sources to verify (short list).\n\
\n\
Content:\n{text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_content_at_the_end() {
        let prompt = build_prompt("The moon is made of cheese.");
        assert!(prompt.ends_with("\n\nContent:\nThe moon is made of cheese."));
    }

    #[test]
    fn asks_for_all_four_parts() {
        let prompt = build_prompt("x");
        assert!(prompt.starts_with("You are an assistant that evaluates whether a piece of content is likely to be misinformation."));
        assert!(prompt.contains("\n1) a short verdict: \"Likely True\" / \"Likely Misleading\" / \"Unverified\" / \"Likely False\";\n"));
        assert!(prompt.contains("\n2) a confidence score 0-100;\n"));
        assert!(prompt.contains("\n3) 3 concise reasons explaining why;\n"));
        assert!(prompt.contains("\n4) suggestions for sources to verify (short list).\n"));
    }
}
