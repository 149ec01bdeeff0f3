use crate::models::{RecommendationRequest, VIEWING_HISTORY};

/// Output-shape instruction appended to every prompt.
///
/// Names the exact fields the response parser decodes, so the parser's
/// assumptions hold without a translation layer.
const OUTPUT_SHAPE: &str = "Respond with only a JSON array of objects, each with exactly the \
     fields \"movie\", \"director\" and \"imdb\", where \"imdb\" is the movie's IMDB id \
     (two letters followed by seven digits, e.g. tt0209144).";

/// Builds the natural-language instruction for a recommendation request.
///
/// Pure string construction; the closed request enum makes an invalid kind
/// unrepresentable here.
pub fn build_prompt(request: &RecommendationRequest) -> String {
    match request {
        RecommendationRequest::Movie { title } => format!(
            "Generate five movie recommendations similar in theme and style to the movie {}. {}",
            title, OUTPUT_SHAPE
        ),
        RecommendationRequest::Director { name } => format!(
            "Generate five movie recommendations from a different director than {} but with a similar style. {}",
            name, OUTPUT_SHAPE
        ),
        RecommendationRequest::Actor { name } => format!(
            "Generate five movie recommendations featuring {} or movies with a similar style to their work. {}",
            name, OUTPUT_SHAPE
        ),
        RecommendationRequest::History => format!(
            "Generate five movie recommendations based on these previously watched movies, given by IMDB id: {}. {}",
            VIEWING_HISTORY.join(", "),
            OUTPUT_SHAPE
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_prompt_contains_seed() {
        let prompt = build_prompt(&RecommendationRequest::Movie {
            title: "Inception".to_string(),
        });
        assert!(!prompt.is_empty());
        assert!(prompt.contains("Inception"));
    }

    #[test]
    fn test_director_prompt_contains_seed() {
        let prompt = build_prompt(&RecommendationRequest::Director {
            name: "Denis Villeneuve".to_string(),
        });
        assert!(prompt.contains("Denis Villeneuve"));
        assert!(prompt.contains("different director"));
    }

    #[test]
    fn test_actor_prompt_contains_seed() {
        let prompt = build_prompt(&RecommendationRequest::Actor {
            name: "Frances McDormand".to_string(),
        });
        assert!(prompt.contains("Frances McDormand"));
    }

    #[test]
    fn test_history_prompt_enumerates_all_seeds() {
        let prompt = build_prompt(&RecommendationRequest::History);
        for imdb_id in VIEWING_HISTORY {
            assert!(prompt.contains(imdb_id), "missing {}", imdb_id);
        }
    }

    #[test]
    fn test_every_prompt_states_field_names() {
        let requests = [
            RecommendationRequest::Movie {
                title: "Heat".to_string(),
            },
            RecommendationRequest::Director {
                name: "Michael Mann".to_string(),
            },
            RecommendationRequest::Actor {
                name: "Al Pacino".to_string(),
            },
            RecommendationRequest::History,
        ];

        for request in &requests {
            let prompt = build_prompt(request);
            assert!(prompt.contains("\"movie\""));
            assert!(prompt.contains("\"director\""));
            assert!(prompt.contains("\"imdb\""));
        }
    }
}
