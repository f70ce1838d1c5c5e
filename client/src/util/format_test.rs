use super::*;

#[test]
fn format_cost_uses_two_decimals() {
    assert_eq!(format_cost(0.53), "$0.53");
    assert_eq!(format_cost(2.38), "$2.38");
    assert_eq!(format_cost(2.12), "$2.12");
}

#[test]
fn format_seconds_uses_two_decimals() {
    assert_eq!(format_seconds(6.32), "6.32s");
}

#[test]
fn price_line_joins_input_and_output() {
    assert_eq!(price_line("$4.00", "$20.00"), "$4.00 / $20.00 per 1M tokens");
}

#[test]
fn initials_take_first_letters() {
    assert_eq!(initials("alice"), "A");
    assert_eq!(initials("alice.smith"), "AS");
    assert_eq!(initials("Bob Van Dyke"), "BV");
    assert_eq!(initials(""), "?");
}
