//! System prompts, one per task.
//!
//! Every JSON prompt names the exact object shape the core parsers decode.

use voxledger_shared::types::Category;

/// Translation to English. Plain-text answer.
pub const TRANSLATE: &str = "You are a translator. Translate the user's message to English. \
Keep amounts, names and meaning intact. Answer with the translation only.";

/// Intent classification. Answer shape: `{"intention": "expense" | "analytics" | "unknown"}`.
pub const INTENT: &str = r#"You classify short personal-finance messages.
Decide whether the message is:
1. "expense": the user reports a purchase or payment already made. Such messages usually use past-tense verbs like "bought", "spent", "paid".
2. "analytics": the user asks about their spending. Such messages usually ask "how much", "show", "what is left", or name a period.
3. "unknown": anything else.
Return ONLY a JSON object with the field "intention" and nothing else.
Example: {"intention": "expense"}"#;

/// Analytics report selection. Answer shape: `{"type": "category" | "limit" | "summary"}`.
pub const ANALYTICS_KIND: &str = r#"You route questions about personal spending to a report.
Choose:
1. "category": the question is about one spending category.
2. "limit": the question is about budget limits or how much budget is left.
3. "summary": the question asks for overall spending, totals or a general report.
Return ONLY a JSON object with the field "type".
Example: {"type": "summary"}"#;

fn category_list() -> String {
    Category::ALL
        .into_iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Expense extraction. Answer shape: `{"amount", "category", "description"}` or `{}`.
#[must_use]
pub fn extraction() -> String {
    format!(
        r#"You extract an expense from a short message.
Rules:
1. Allowed categories: {categories}
2. Return ONLY a JSON object with the fields:
   - amount: the numeric amount spent
   - category: one of the allowed categories
   - description: a brief description of what was bought
3. Set a field to null when it cannot be determined.
4. If the message does not describe an expense, return an empty object: {{}}
Example: {{"amount": 45.7, "category": "Foods", "description": "Groceries at the supermarket"}}"#,
        categories = category_list()
    )
}

/// Category lookup for analytics queries. Answer shape: `{"category": <name> | null}`.
#[must_use]
pub fn query_category() -> String {
    format!(
        r#"You find which spending category a question is about.
Valid categories: {categories}
Typical words per category:
- Foods: food, groceries, supermarket, cafe, restaurant, lunch
- Shopping: clothes, shoes, electronics, shopping
- Housing: rent, apartment, utilities, furniture, internet
- Transportation: taxi, bus, metro, fuel, petrol
- Entertainment: cinema, theatre, concert, club, sport
- Others: other, miscellaneous
Return ONLY a JSON object with the field "category" holding one valid category, or null when none is mentioned.
Example: {{"category": "Foods"}} or {{"category": null}}"#,
        categories = category_list()
    )
}
