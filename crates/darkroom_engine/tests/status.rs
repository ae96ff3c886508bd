use darkroom_engine::StatusKind;
use pretty_assertions::assert_eq;

#[test]
fn recognized_literals_decode_directly() {
    assert_eq!(StatusKind::parse("processing"), StatusKind::Processing);
    assert_eq!(StatusKind::parse("completed"), StatusKind::Completed);
}

#[test]
fn error_status_splits_on_the_first_colon_only() {
    assert_eq!(
        StatusKind::parse("error:corrupt input"),
        StatusKind::Error("corrupt input".to_string())
    );
    assert_eq!(
        StatusKind::parse("error:bad: colon: soup"),
        StatusKind::Error("bad: colon: soup".to_string())
    );
    assert_eq!(
        StatusKind::parse("error:"),
        StatusKind::Error(String::new())
    );
}

#[test]
fn anything_else_is_unrecognized() {
    assert_eq!(
        StatusKind::parse("not_found"),
        StatusKind::Unrecognized("not_found".to_string())
    );
    // A bare "error" without a colon is outside the contract.
    assert_eq!(
        StatusKind::parse("error"),
        StatusKind::Unrecognized("error".to_string())
    );
    // Literals are case-sensitive on the wire.
    assert_eq!(
        StatusKind::parse("Completed"),
        StatusKind::Unrecognized("Completed".to_string())
    );
}
