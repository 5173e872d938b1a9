use super::*;

#[test]
fn matching_long_enough_passwords_pass() {
    assert_eq!(validate_new_password("secret1", "secret1"), Ok(()));
    assert_eq!(validate_new_password("123456", "123456"), Ok(()));
}

#[test]
fn mismatch_is_reported_first() {
    assert_eq!(validate_new_password("abc", "abd"), Err(("Erro", "As senhas não coincidem.")));
}

#[test]
fn short_password_is_rejected() {
    assert_eq!(validate_new_password("12345", "12345"), Err(("Senha muito curta", "Mínimo de 6 caracteres.")));
}
