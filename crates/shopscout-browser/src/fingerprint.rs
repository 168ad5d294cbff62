use rand::Rng;
use shopscout_core::BrowserConfig;

/// Default desktop user agent used when randomization is off.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Launch fingerprint: user agent and window size.
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl FingerprintConfig {
    /// Generate a randomized fingerprint configuration
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();

        // Common desktop user agents
        let user_agents = [
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            DEFAULT_USER_AGENT,
        ];

        // Common viewport sizes
        let viewports = [(1920, 1080), (1366, 768), (1536, 864), (1440, 900)];

        let ua_idx = rng.gen_range(0..user_agents.len());
        let vp_idx = rng.gen_range(0..viewports.len());
        let (width, height) = viewports[vp_idx];

        Self {
            user_agent: user_agents[ua_idx].to_string(),
            viewport_width: width,
            viewport_height: height,
        }
    }

    /// Build the fingerprint from browser settings.
    ///
    /// Randomizes when the settings ask for it, otherwise uses the configured
    /// window size with the default user agent.
    pub fn from_config(config: &BrowserConfig) -> Self {
        if config.randomize_fingerprint {
            return Self::randomized();
        }

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            viewport_width: config.window_width,
            viewport_height: config.window_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomized_fingerprint() {
        let config = FingerprintConfig::randomized();
        assert!(!config.user_agent.is_empty());
        assert!(config.viewport_width > 0);
        assert!(config.viewport_height > 0);
    }

    #[test]
    fn test_fixed_fingerprint_from_config() {
        let browser = BrowserConfig {
            randomize_fingerprint: false,
            window_width: 1280,
            window_height: 720,
            ..BrowserConfig::default()
        };

        let config = FingerprintConfig::from_config(&browser);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!((config.viewport_width, config.viewport_height), (1280, 720));
    }
}
