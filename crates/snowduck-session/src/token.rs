use rand::distr::Alphanumeric;
use rand::Rng;

/// A cryptographically random opaque token, matching the reference
/// service's driver protocol, which never attaches structure to the
/// token string a client sees.
pub fn generate_token() -> String {
    rand::rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect()
}
