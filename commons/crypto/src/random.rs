use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Total length of a generated admin password, separator included.
pub const ADMIN_PASSWORD_LENGTH: usize = 32;

/// Separator characters accepted by the Jamf Pro password policy.
pub const PASSWORD_SEPARATORS: [char; 2] = ['-', '_'];

/*
 * Generates a random alphanumeric string of the given length.
 */
pub fn generate_random_alphanumeric(length: usize) -> String {
    let code: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect();
    code
}

/*
 * Generates an admin password meeting the Jamf Pro complexity rules:
 * letters and digits, with one separator inserted at a random position.
 * thread_rng is a CSPRNG, suitable for credentials.
 */
pub fn generate_admin_password() -> String {
    let mut rng = thread_rng();
    let mut password = generate_random_alphanumeric(ADMIN_PASSWORD_LENGTH - 1);
    let separator = PASSWORD_SEPARATORS[rng.gen_range(0..PASSWORD_SEPARATORS.len())];
    let insert_at = rng.gen_range(0..=password.len());
    password.insert(insert_at, separator);
    password
}
