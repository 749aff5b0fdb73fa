use super::*;

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(50.0), "50.0%");
    assert_eq!(format_percent(100.0 / 3.0), "33.3%");
    assert_eq!(format_percent(f64::NAN), "0.0%");
    assert_eq!(format_percent(f64::INFINITY), "0.0%");
}

#[test]
fn test_sanitize_cell() {
    assert_eq!(sanitize_cell("a\tb\nc\r"), "a b c ");
    assert_eq!(sanitize_cell("plain"), "plain");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("Tutorial", 10), "Tutorial");
    assert_eq!(truncate("1000 Genomes Demo", 8), "1000 Ge~");
    assert_eq!(truncate("", 0), "");
}

#[test]
fn test_date_part_keeps_the_day() {
    assert_eq!(date_part("2017-03-12T19:27:08.156Z"), "2017-03-12");
    assert_eq!(date_part("2017-03-12"), "2017-03-12");
    assert_eq!(date_part("2017"), "2017");
}
