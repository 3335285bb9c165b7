//! Prompt text sent to the generation provider

/// System preamble for component generation
pub const PREAMBLE: &str = "You are an expert React and TypeScript developer specializing in creating modern, accessible components with Tailwind CSS.";

const COMPONENT_REQUIREMENTS: &[&str] = &[
    "Use TypeScript with React 18+ hooks",
    "Style with Tailwind CSS utility classes",
    "Make the component responsive and accessible",
    "Define prop types and sensible default values",
    "Add comments for complex logic",
    "Keep the code cleanly formatted",
    "Handle loading and error states where relevant",
    "Follow React best practices",
    "Use semantic HTML elements",
];

const CHAT_GUIDELINES: &[&str] = &[
    "Use modern React practices with TypeScript",
    "Include proper type definitions",
    "Use Tailwind CSS for styling",
    "Make the component responsive and accessible",
    "Add helpful comments explaining key parts",
    "Include all necessary imports",
    "Format the code properly",
    "Use modern hooks like useState, useEffect, useCallback where appropriate",
    "Include error handling and loading states",
    "Follow accessibility best practices",
];

/// Prompt for one-shot generation from a description
pub fn enhanced_prompt(description: &str) -> String {
    let mut prompt = format!(
        "Create a React component based on this description: \"{}\".\n\nRequirements:\n",
        description.trim()
    );
    for requirement in COMPONENT_REQUIREMENTS {
        prompt.push_str("- ");
        prompt.push_str(requirement);
        prompt.push('\n');
    }
    prompt.push_str("\nReturn only the component code without explanation.");
    prompt
}

/// Prompt for the chat stream; asks for a fenced code block
pub fn chat_prompt(request: &str) -> String {
    let mut prompt = format!(
        "You are an expert React developer. Generate a React component based on this request: {}\n\nFollow these guidelines:\n",
        request.trim()
    );
    for (i, guideline) in CHAT_GUIDELINES.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, guideline));
    }
    prompt.push_str(
        "\nReturn ONLY the component code wrapped in a code block with the appropriate language tag (e.g. ```tsx).",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhanced_prompt_quotes_description() {
        let prompt = enhanced_prompt("  a pricing card with three tiers ");
        assert!(prompt.starts_with(
            "Create a React component based on this description: \"a pricing card with three tiers\"."
        ));
        assert!(prompt.contains("- Use semantic HTML elements\n"));
        assert!(prompt.ends_with("Return only the component code without explanation."));
    }

    #[test]
    fn test_chat_prompt_numbers_guidelines() {
        let prompt = chat_prompt("a login form");
        assert!(prompt.contains("based on this request: a login form\n"));
        assert!(prompt.contains("1. Use modern React practices with TypeScript\n"));
        assert!(prompt.contains("10. Follow accessibility best practices\n"));
        assert!(prompt.ends_with("(e.g. ```tsx)."));
    }
}
