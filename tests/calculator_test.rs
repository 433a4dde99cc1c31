use small_calc::app::session::run_keypad_session;
use small_calc::{
    calculate_sum, create_processor, evaluate, keypad_layout, process_list, Accumulator,
    Calculator, Key, Value,
};
use std::io::Cursor;

#[test]
fn test_arithmetic_helpers_together() {
    let mut numbers = vec![9, 1, 5];
    let total = process_list(&mut numbers).unwrap();
    assert_eq!(total, 15);
    assert_eq!(calculate_sum(total, 5).unwrap(), 20);

    let mut acc = Accumulator::new(total);
    acc.add(5).unwrap();
    assert_eq!(acc.value(), 20);
}

#[test]
fn test_processor_summary_matches_example_run() {
    let mut processor = create_processor("Main Processor", Some(&[1, 2, 3, 4, 5]));
    let results = processor.process_data();
    let stats = processor.statistics();

    assert_eq!(results.len(), 5);
    assert_eq!(
        serde_json::to_value(&stats).unwrap(),
        serde_json::json!({"total": 15, "count": 5, "average": 3.0, "max": 5})
    );
}

#[test]
fn test_every_keypad_button_is_pressable() {
    let mut calc = Calculator::new();
    for (key, _) in keypad_layout() {
        if let Key::Digit(_) = key {
            calc.press(key).unwrap();
        }
    }
    assert_eq!(calc.display(), "0123456789");
    calc.press(Key::Plus).unwrap();
    calc.press(Key::Digit(1)).unwrap();
    calc.press(Key::Equals).unwrap();
    assert_eq!(calc.display(), "123456790");
}

#[test]
fn test_evaluator_never_runs_code() {
    for input in ["open('x')", "1; 2", "1 if 1 else 2", "[1]", "2 + 'a'"] {
        assert!(evaluate(input).is_err(), "{} should be rejected", input);
    }
    assert_eq!(evaluate("(1 + 2) * 3 - 4 / 2").unwrap(), Value::Float(7.0));
}

#[test]
fn test_session_with_custom_error_title() {
    let mut calc = Calculator::new();
    let mut out = Vec::new();
    run_keypad_session(Cursor::new("9+\n=\nC\n3+4=\n"), &mut out, &mut calc, "Oops").unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["9 + ", "Oops: Invalid expression", "9 + ", "", "7"]);
}
