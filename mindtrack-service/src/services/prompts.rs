//! Prompt templates.
//!
//! Every field is substituted verbatim; nothing is escaped.

use crate::models::{CustomTipRequest, InsightsRequest, TipsRequest};
use serde_json::{Map, Value};

/// Prompt asking for exactly three short tips.
pub fn tips_prompt(request: &TipsRequest) -> String {
    format!(
        "As a mental health advisor, analyze this user data and provide exactly 3 short, specific mental health tips:

User Data:
- Anxiety level: {anxiety}
- Stress level: {stress}
- Daily screen time: {screen_time}
- Daily phone unlocks: {unlocks}
- Most used app: {app}
- Mood description: \"{mood}\"
- Weekly mood data: {weekly}

Return exactly 3 tips that are concise (under 100 characters each) and directly actionable.
Each tip should target a different aspect of mental wellbeing based on the data.
Format the response as a list of 3 tips only, with no additional text, numbering, or explanations.",
        anxiety = request.anxiety_level,
        stress = request.stress_level,
        screen_time = request.screen_time,
        unlocks = request.unlock_count,
        app = request.most_used_app,
        mood = request.mood_description,
        weekly = render_moods(&request.weekly_moods),
    )
}

/// Prompt asking for an analysis followed by 4-5 titled suggestions.
pub fn insights_prompt(request: &InsightsRequest) -> String {
    format!(
        "As a mental health advisor, analyze the following data and provide 4-5 personalized mental health suggestions, explaining the rationale behind each suggestion:

User Profile:
- Age: {age}
- Gender: {gender}
- Profession: {profession}

Weekly Mood Data: {weekly}

Digital Well-being Metrics:
- Daily Screen Time: {screen_time}
- Daily Phone Unlock Count: {unlocks}
- Most Used App: {app}

User's Description of Their Mood: \"{mood}\"

Based on this data, please provide:
1. A brief analysis of potential mental health impacts
2. 4-5 specific, actionable suggestions to improve mental wellbeing
3. For each suggestion, explain why it might help this particular user

Format each suggestion with a clear title and detailed explanation.",
        age = request.age,
        gender = request.gender,
        profession = request.profession,
        weekly = render_moods(&request.weekly_moods),
        screen_time = request.screen_time,
        unlocks = request.unlock_count,
        app = request.most_used_app,
        mood = request.mood_description,
    )
}

/// Completion-style prompt for the fine-tuned model.
pub fn custom_tip_prompt(request: &CustomTipRequest) -> String {
    format!(
        "Based on the following user data, give one short, actionable mental health tip.
Anxiety level: {}/10
Stress level: {}/10
Screen time: {} minutes
Phone unlocks: {}
Tip:",
        request.anxiety_level,
        request.stress_level,
        request.screen_time_minutes,
        request.unlock_count,
    )
}

/// Render `{Day: mood, ...}` in client order. String moods are written without quotes.
pub fn render_moods(moods: &Map<String, Value>) -> String {
    let entries: Vec<String> = moods
        .iter()
        .map(|(day, mood)| match mood {
            Value::String(s) => format!("{}: {}", day, s),
            other => format!("{}: {}", day, other),
        })
        .collect();
    format!("{{{}}}", entries.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WellbeingMetrics;
    use serde_json::json;

    fn metrics(value: Value) -> WellbeingMetrics {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn tips_prompt_substitutes_defaults() {
        let prompt = tips_prompt(&TipsRequest::from(WellbeingMetrics::default()));
        assert!(prompt.contains("- Anxiety level: 5\n"));
        assert!(prompt.contains("- Daily screen time: 240m\n"));
        assert!(prompt.contains("- Daily phone unlocks: 50\n"));
        assert!(prompt.contains("- Mood description: \"\"\n"));
        assert!(prompt.contains("- Weekly mood data: {}\n"));
        assert!(prompt.contains("exactly 3 tips"));
    }

    #[test]
    fn insights_prompt_includes_profile_verbatim() {
        let request = InsightsRequest::from(metrics(json!({
            "age": "34",
            "gender": "female",
            "profession": "nurse <night shift>",
            "mood_description": "tired",
            "weekly_moods": {"Monday": "sad", "Tuesday": 3}
        })));
        let prompt = insights_prompt(&request);

        assert!(prompt.contains("- Age: 34\n"));
        assert!(prompt.contains("- Profession: nurse <night shift>\n"));
        assert!(prompt.contains("Weekly Mood Data: {Monday: sad, Tuesday: 3}"));
        assert!(prompt.contains("User's Description of Their Mood: \"tired\""));
        assert!(prompt.contains("- Daily Phone Unlock Count: Unknown\n"));
    }

    #[test]
    fn moods_keep_client_order() {
        let request = TipsRequest::from(metrics(json!({
            "weekly_moods": {"Monday": "sad", "Wednesday": "calm", "Friday": "happy"}
        })));
        assert_eq!(
            render_moods(&request.weekly_moods),
            "{Monday: sad, Wednesday: calm, Friday: happy}"
        );

        let from_body = WellbeingMetrics::from_body(
            br#"{"weekly_moods": {"Sunday": 2, "Saturday": "tired"}}"#,
        )
        .unwrap();
        assert_eq!(
            render_moods(&from_body.weekly_moods.unwrap_or_default()),
            "{Sunday: 2, Saturday: tired}"
        );
    }

    #[test]
    fn prompts_are_deterministic() {
        let request = TipsRequest::from(metrics(json!({"anxiety_level": 8})));
        assert_eq!(tips_prompt(&request), tips_prompt(&request));
    }

    #[test]
    fn custom_tip_prompt_ends_with_completion_cue() {
        let prompt = custom_tip_prompt(&CustomTipRequest {
            anxiety_level: 7,
            stress_level: 6,
            screen_time_minutes: 300,
            unlock_count: 90,
        });
        assert!(prompt.contains("Anxiety level: 7/10\n"));
        assert!(prompt.contains("Screen time: 300 minutes\n"));
        assert!(prompt.ends_with("Tip:"));
    }
}
