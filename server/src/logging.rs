use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEVELOPMENT_DIRECTIVES: &str = "flareproxy=debug,reqwest=info,hyper=info";
const PRODUCTION_DIRECTIVES: &str = "info";

/// Installs the global subscriber. JSON lines in production, human-readable otherwise.
/// `RUST_LOG` always wins over the built-in directives.
pub fn setup_tracing(is_production: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(is_production)));

    let subscriber = tracing_subscriber::registry().with(filter);

    if is_production {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    };
}

fn default_directives(is_production: bool) -> &'static str {
    if is_production {
        PRODUCTION_DIRECTIVES
    } else {
        DEVELOPMENT_DIRECTIVES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_parse() {
        for is_production in [true, false] {
            let directives = default_directives(is_production);
            assert!(EnvFilter::try_new(directives).is_ok(), "{}", directives);
        }
    }
}
