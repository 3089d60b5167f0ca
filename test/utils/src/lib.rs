use std::env;
use std::path;
use std::process;

use serde_json::json;

/// Unique scratch directory under the system temp dir. Callers are expected
/// to clean up after themselves.
pub fn scratch_dir(name: &str) -> path::PathBuf {
    return env::temp_dir().join(format!("fitcoach-{name}-{}", process::id()));
}

/// Builds a Gemini server-sent-events body with one chunk per fragment.
pub fn gemini_sse_body(fragments: &[&str]) -> String {
    return fragments
        .iter()
        .map(|fragment| {
            let chunk = json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "text": fragment }],
                        "role": "model"
                    },
                    "index": 0
                }]
            });
            return format!("data: {chunk}\r\n\r\n");
        })
        .collect::<Vec<String>>()
        .join("");
}

pub fn workout_plan_fixture() -> &'static str {
    return r#"
## Warm-up (5 minutes)
- Jumping jacks, 2 minutes
- Arm circles, 1 minute

## Main exercises
- Goblet squats: 3 sets of 12 reps
- Push-ups: 3 sets of 10 reps

## Cool-down
- Hamstring stretch, 1 minute per side
"#
    .trim();
}
