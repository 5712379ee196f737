//! 生成 `ADMIN_PASSWORD_HASH` 用的 argon2 PHC 字符串
//!
//! ```text
//! cargo run --bin hash-password -- <password>
//! ```

use catering_server::auth::hash_password;

fn main() {
    let mut args = std::env::args().skip(1);
    let password = match args.next() {
        Some(p) if !p.is_empty() => p,
        _ => {
            eprintln!("Usage: hash-password <password>");
            std::process::exit(1);
        }
    };

    match hash_password(&password) {
        Ok(hash) => println!("{hash}"),
        Err(e) => {
            eprintln!("Failed to hash password: {e}");
            std::process::exit(1);
        }
    }
}
