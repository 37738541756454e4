use std::fmt;

use crate::error;

pub type Res<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn next_value<T>(it: &mut std::slice::Iter<'_, String>, opt: &str) -> T
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let n = it
        .next()
        .unwrap_or_else(|| error_exit(format!("{}: value missing", opt)));
    n.parse()
        .unwrap_or_else(|e| error_exit(format!("{}: {} '{}'", opt, e, n)))
}

pub fn error_exit<T: fmt::Display, U>(t: T) -> U {
    error!("{}", t);
    std::process::exit(1);
}

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

// 切り上げ (100点単位)
pub fn round_up_100(n: u32) -> u32 {
    (n + 99) / 100 * 100
}

#[test]
fn test_round_up_100() {
    assert_eq!(round_up_100(0), 0);
    assert_eq!(round_up_100(1), 100);
    assert_eq!(round_up_100(1920), 2000);
    assert_eq!(round_up_100(4000), 4000);
}

#[test]
fn test_vec_helpers() {
    assert_eq!(vec_to_string(&[1, 2, 3]), "[1, 2, 3]");
    assert_eq!(vec_to_string::<u8>(&[]), "[]");
}
