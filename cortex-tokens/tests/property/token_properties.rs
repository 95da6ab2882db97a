use cortex_tokens::TokenCounter;
use proptest::prelude::*;

proptest! {
    #[test]
    fn longer_text_never_costs_less(a in ".{0,200}", extra in ".{1,50}") {
        let counter = TokenCounter::new();
        let b = format!("{a}{extra}");
        prop_assert!(counter.estimate(&a) <= counter.estimate(&b));
    }

    #[test]
    fn one_to_four_chars_is_one_token(s in ".{1,4}") {
        prop_assert_eq!(TokenCounter::new().estimate(&s), 1);
    }

    #[test]
    fn truncation_never_exceeds_budget(text in ".{0,300}", budget in 0usize..40) {
        let counter = TokenCounter::new();
        let out = counter.truncate_to_fit(&text, budget);
        prop_assert!(out.chars().count() <= budget * 4);
        if budget > 0 {
            prop_assert!(counter.estimate(&out) <= budget);
        }
    }

    #[test]
    fn truncated_output_is_never_just_the_ellipsis(text in "[a-z ]{50,200}", budget in 1usize..10) {
        let out = TokenCounter::new().truncate_to_fit(&text, budget);
        prop_assert_ne!(out.as_str(), "...");
    }
}
