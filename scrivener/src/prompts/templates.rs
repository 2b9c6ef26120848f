//! Built-in prompt templates.
//!
//! Each agent role has one system prompt and one task template per
//! operation. Templates use Jinja2 syntax and are rendered by
//! [`PromptEngine`](super::PromptEngine).

use serde::{Deserialize, Serialize};

/// Researcher system prompt.
pub const RESEARCHER_SYSTEM: &str = "You are an expert researcher with deep knowledge across multiple domains.
Your job is to provide comprehensive, well-structured research on any given topic.

When researching a topic:
1. Break down the topic into key subtopics
2. Provide factual information from multiple perspectives
3. Include relevant statistics, examples, and case studies
4. Cite potential sources (even if simulated)
5. Identify areas that need fact-checking

Format your research as a structured report with clear sections.";

/// Fact-checker system prompt, including the rating scale parsed from replies.
pub const FACT_CHECKER_SYSTEM: &str = "You are a meticulous fact-checker and critical thinker.
Your job is to review research findings and identify:
1. Claims that need verification
2. Potential inaccuracies or misleading statements
3. Missing citations or sources
4. Logical inconsistencies
5. Biases or one-sided perspectives

Be thorough but fair. Rate the overall accuracy and provide specific feedback.

Rating scale:
- HIGH: Well-researched, accurate, balanced
- MEDIUM: Generally accurate but has some gaps or minor issues
- LOW: Contains significant inaccuracies or misleading information
- UNVERIFIABLE: Claims cannot be verified or lack sufficient evidence";

/// Writer system prompt.
pub const WRITER_SYSTEM: &str = "You are an expert content writer skilled at transforming research into engaging, clear, and accurate content.

Your writing should be:
1. Clear and accessible to the target audience
2. Well-structured with logical flow
3. Engaging and interesting
4. Factually accurate based on provided research
5. Free of jargon unless necessary (with explanations when used)

You can write in various formats: articles, blog posts, reports, summaries, etc.
Always maintain accuracy while making the content compelling.";

const RESEARCH: &str = "Research the following topic: {{ topic }}

Additional context: {{ context }}

Provide a comprehensive research report.";

const FOCUSED_RESEARCH: &str = "Research the topic: {{ topic }}

Answer these specific questions:
{{ questions | numbered }}

Provide detailed, evidence-based answers to each question.";

const FACT_CHECK: &str = "Topic: {{ topic }}

Research Content to Fact-Check:
{{ content }}

Provide a detailed fact-check report including:
1. Overall accuracy rating (HIGH, MEDIUM, LOW or UNVERIFIABLE)
2. Specific claims that need verification
3. Identified issues or concerns
4. Recommendations for improvement
5. Claims that are accurate and well-supported";

const VERIFY_CLAIMS: &str = "Verify the following claims:

{{ claims | numbered }}

Context: {{ context }}

For each claim, provide:
- Verification status (VERIFIED/PARTIALLY_VERIFIED/UNVERIFIED/FALSE)
- Reasoning
- Potential sources that would support or refute the claim
- Any caveats or nuances";

const CROSS_CHECK: &str = "Topic: {{ topic }}
{% for source in sources %}
Research Source {{ source.label }}{% if source.name %} ({{ source.name }}){% endif %}:
{{ source.text }}
{% endfor %}
Cross-check these research sources and identify:
1. Points of agreement
2. Contradictions or inconsistencies
3. Complementary information
4. Which source appears more reliable and why
5. Recommendations for reconciling differences";

const WRITE_ARTICLE: &str = "Write a {{ style }} article on the topic: {{ topic }}

Research Content:
{{ research }}

Fact-Check Report:
{{ fact_check }}

Target Length: {{ length }}

Instructions:
- Use the research as your source material
- Address any concerns raised in the fact-check report
- Write in a {{ style }} style
- Include a compelling introduction and conclusion
- Use headings and subheadings for organization
- Only include verified information";

const WRITE_SUMMARY: &str = "Create a concise summary of the following research on: {{ topic }}

Research Content:
{{ research }}

Write a clear, accurate summary in {{ paragraphs }} paragraphs or less.
Capture the most important points and key takeaways.";

const WRITE_COMPARISON: &str = "Write a comparison analysis on: {{ topic }}

Different Perspectives:
{% for p in perspectives %}{% if not loop.first %}

{% endif %}Perspective {{ loop.index }} ({{ p.name }}):
{{ p.findings }}{% endfor %}
{% if cross_check %}
Cross-Check Analysis:
{{ cross_check }}
{% endif %}
Create a balanced comparison that:
1. Presents each perspective fairly
2. Identifies key differences and similarities
3. Analyzes the strengths and weaknesses of each view
4. Provides an objective synthesis";

const REFINE_CONTENT: &str = "Refine the following content based on the feedback provided.

Original Content:
{{ content }}

Feedback:
{{ feedback }}
{% if focus_areas %}
Focus particularly on:
{{ focus_areas | bulleted }}
{% endif %}
Provide an improved version that addresses all feedback while maintaining the core message and accuracy.";

/// Research task templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchPrompts {
    /// System prompt.
    pub system: String,
    /// Open research with free-form context.
    pub research: String,
    /// Research answering a numbered question list.
    pub focused: String,
}

impl Default for ResearchPrompts {
    fn default() -> Self {
        Self {
            system: RESEARCHER_SYSTEM.to_owned(),
            research: RESEARCH.to_owned(),
            focused: FOCUSED_RESEARCH.to_owned(),
        }
    }
}

/// Fact-check task templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactCheckPrompts {
    /// System prompt.
    pub system: String,
    /// Rated review of one body of content.
    pub fact_check: String,
    /// Per-claim verification.
    pub verify_claims: String,
    /// Consistency check across labelled sources.
    pub cross_check: String,
}

impl Default for FactCheckPrompts {
    fn default() -> Self {
        Self {
            system: FACT_CHECKER_SYSTEM.to_owned(),
            fact_check: FACT_CHECK.to_owned(),
            verify_claims: VERIFY_CLAIMS.to_owned(),
            cross_check: CROSS_CHECK.to_owned(),
        }
    }
}

/// Writer task templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterPrompts {
    /// System prompt.
    pub system: String,
    /// Article from research plus fact-check report.
    pub article: String,
    /// Paragraph-capped summary.
    pub summary: String,
    /// Comparison across perspectives.
    pub comparison: String,
    /// Revision against feedback.
    pub refine: String,
}

impl Default for WriterPrompts {
    fn default() -> Self {
        Self {
            system: WRITER_SYSTEM.to_owned(),
            article: WRITE_ARTICLE.to_owned(),
            summary: WRITE_SUMMARY.to_owned(),
            comparison: WRITE_COMPARISON.to_owned(),
            refine: REFINE_CONTENT.to_owned(),
        }
    }
}

/// Complete set of prompt templates for the three roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplates {
    /// Researcher templates.
    pub researcher: ResearchPrompts,
    /// Fact-checker templates.
    pub fact_checker: FactCheckPrompts,
    /// Writer templates.
    pub writer: WriterPrompts,
}
