//! Static content served when no generator answer is available.

use crate::models::InsightsRequest;

/// Number of tips every tips response carries.
pub const TIP_COUNT: usize = 3;

/// Also used to pad short generator answers, cycling by output length, so
/// its size is tied to [`TIP_COUNT`].
pub const FALLBACK_TIPS: [&str; TIP_COUNT] = [
    "Take regular breaks from your screen every 30 minutes.",
    "Practice deep breathing exercises when feeling stressed.",
    "Set boundaries for your device usage, especially before bedtime.",
];

/// Insights returned when the upstream call failed.
pub const FALLBACK_INSIGHTS: &str = concat!(
    "\n",
    "# Mental Health Insights\n",
    "\n",
    "It seems we encountered an issue connecting to our AI service. Here are some general tips:\n",
    "\n",
    "## Take Regular Breaks\n",
    "\n",
    "Consider stepping away from screens every 30-45 minutes to reduce eye strain and mental fatigue.\n",
    "\n",
    "## Practice Mindfulness\n",
    "\n",
    "Set aside 5-10 minutes daily for deep breathing or meditation to reduce stress.\n",
    "\n",
    "## Establish Digital Boundaries\n",
    "\n",
    "Consider designating tech-free times or zones in your daily routine.\n",
    "\n",
    "## Prioritize Sleep\n",
    "\n",
    "Try to maintain a consistent sleep schedule and avoid screens before bedtime.\n",
);

/// Fallback tips as owned strings.
pub fn fallback_tips() -> Vec<String> {
    FALLBACK_TIPS.iter().map(|tip| tip.to_string()).collect()
}

/// Insights shown when no generator is configured at all.
pub fn demo_insights(request: &InsightsRequest) -> String {
    format!(
        concat!(
            "\n",
            "# Mental Health Insights\n",
            "\n",
            "Based on your data, here are some personalized insights:\n",
            "\n",
            "## Recognize Screen Time Patterns\n",
            "\n",
            "Your daily screen time of {screen_time} suggests potential digital overload. \n",
            "Consider setting app time limits and taking regular breaks from your devices.\n",
            "\n",
            "## Practice Mindfulness Techniques\n",
            "\n",
            "Your mood patterns and unlock frequency indicate stress. Try deep breathing exercises \n",
            "or meditation for 5 minutes when you feel overwhelmed.\n",
            "\n",
            "## Establish Healthy Phone Boundaries\n",
            "\n",
            "With {unlock_count} phone unlocks daily, you might benefit from designating phone-free zones \n",
            "or times, particularly during meals and before bedtime.\n",
            "\n",
            "## Seek Balance in Digital Life\n",
            "\n",
            "Your most used app is {most_used_app}. Consider if this aligns with your priorities \n",
            "and values. Try diversifying your activities and interests.\n",
        ),
        screen_time = request.screen_time,
        unlock_count = request.unlock_count,
        most_used_app = request.most_used_app,
    )
}
