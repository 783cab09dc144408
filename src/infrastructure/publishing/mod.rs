mod dry_run_platform_client;

pub use dry_run_platform_client::DryRunPlatformClient;
