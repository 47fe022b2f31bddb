/// Example program to print the loaded transition configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    // Load configuration from rune.toml
    let config = rune_config::RuneConfig::load();
    let transition = &config.transition;

    println!("=== Rune Transition Configuration ===\n");

    println!("Transition Defaults:");
    println!("  Appear: {}", transition.appear);
    println!("  Enter Timeout (ms): {}", transition.enter_timeout_ms);
    println!("  Exit Timeout (ms): {}", transition.exit_timeout_ms);
    println!("  Appear Timeout (ms): {:?}", transition.appear_timeout_ms);
    println!("  Mount On Demand: {}", transition.mount_on_demand);
    println!("  Class Prefix: {:?}", transition.class_prefix);
    println!();

    // Try to serialize to TOML for verification
    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
