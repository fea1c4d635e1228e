//! Prompt construction: turns a user query plus the catalog snapshot into
//! the single instruction payload sent to the inference backend.

use crate::catalog::CatalogStore;

/// Role line framing the whole task.
const ADVISOR_ROLE: &str = "You are an AI Product Advisor. A user has described \
their needs, and you need to recommend the best products from the available catalog.";

/// Numbered task instructions handed to the backend.
const TASK_STEPS: &str = "\
1. Analyze the user's query and identify their key requirements (price range, features, category, use case, etc.)
2. Match these requirements against the product catalog
3. Recommend the TOP 3 most suitable products
4. For each recommendation, provide a clear explanation of WHY it matches their needs
5. Consider factors like price-to-value ratio, feature alignment, and user context";

/// Response shape the parser depends on. The closing JSON-only line is a
/// contract the backend is asked to honor but cannot be trusted to; the
/// parser unwraps fenced and prose-wrapped bodies anyway.
const RESPONSE_SCHEMA: &str = r#"{
  "analysis": "Brief analysis of the user's needs",
  "recommendations": [
    {
      "productId": number,
      "matchScore": number (0-100),
      "reason": "Detailed explanation of why this product fits their needs",
      "highlights": ["key feature 1", "key feature 2", "key feature 3"]
    }
  ]
}"#;

/// Build the instruction payload for one query.
///
/// Pure function of its inputs: the same query against the same catalog
/// yields byte-identical output. No network or state side effects.
pub fn render(query: &str, catalog: &CatalogStore) -> String {
    let dump = serde_json::to_string_pretty(catalog.products())
        .expect("catalog of plain data serializes to JSON");

    format!(
        "{ADVISOR_ROLE}\n\n\
         USER QUERY: \"{query}\"\n\n\
         AVAILABLE PRODUCTS:\n{dump}\n\n\
         INSTRUCTIONS:\n{TASK_STEPS}\n\n\
         RESPONSE FORMAT:\n\
         Return your response as a valid JSON object with this structure:\n\
         {RESPONSE_SCHEMA}\n\n\
         Important: Respond ONLY with the JSON object, no additional text before or after."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_query_and_catalog() {
        let catalog = CatalogStore::builtin();
        let prompt = render("a light laptop for travel", &catalog);

        assert!(prompt.contains("USER QUERY: \"a light laptop for travel\""));
        assert!(prompt.contains("MacBook Air M2"));
        assert!(prompt.contains("Apple AirPods Pro 2nd Gen"));
    }

    #[test]
    fn declares_the_json_contract() {
        let catalog = CatalogStore::builtin();
        let prompt = render("anything", &catalog);

        assert!(prompt.contains("\"productId\": number"));
        assert!(prompt.contains("\"matchScore\": number (0-100)"));
        assert!(prompt.contains("Respond ONLY with the JSON object"));
    }

    #[test]
    fn render_is_deterministic() {
        let catalog = CatalogStore::builtin();
        assert_eq!(
            render("tablet for sketching", &catalog),
            render("tablet for sketching", &catalog)
        );
    }

    #[test]
    fn catalog_dump_is_valid_json() {
        let catalog = CatalogStore::builtin();
        let prompt = render("q", &catalog);

        let start = prompt.find("AVAILABLE PRODUCTS:\n").unwrap() + "AVAILABLE PRODUCTS:\n".len();
        let end = prompt.find("\n\nINSTRUCTIONS:").unwrap();
        let dump: serde_json::Value = serde_json::from_str(&prompt[start..end]).unwrap();
        assert_eq!(dump.as_array().unwrap().len(), 10);
    }
}
