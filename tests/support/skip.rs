/// Skip a test if AWS credentials are not configured.
#[macro_export]
macro_rules! skip_without_aws {
    () => {
        if std::env::var("AWS_ACCESS_KEY_ID").is_err() {
            eprintln!("SKIPPED: AWS_ACCESS_KEY_ID not set");
            return;
        }
        if std::env::var("KEYWATCH_TEST_USER").is_err() {
            eprintln!("SKIPPED: KEYWATCH_TEST_USER not set (set to an IAM user name)");
            return;
        }
    };
}
