mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::contains;

    use std::fs;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "apiaudit";

    const CLIENT_PHP: &str = "<?php\n\
        $response = wp_remote_post('https://api.example.com/v1/orders', [\n\
        \x20   'headers' => ['Content-Type' => 'application/json'],\n\
        \x20   'body' => '{\"id\":7}',\n\
        ]);\n";

    #[test]
    fn test_output__when_no_matches() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("index.php"), "<?php echo 'hello';")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.current_dir(dir.path()).arg(".");

        cmd.assert()
            .success()
            .stdout(contains("No API URLs, headers, or body data found."))
            .stdout(contains("Total files scanned: 1"))
            .stdout(contains("Total records found: 0"));
        assert!(!dir.path().join("reports").exists());
        Ok(())
    }

    #[test]
    fn test_output__when_explicit_report_path() -> TestResult {
        let dir = tempfile::tempdir()?;
        let site = dir.path().join("site");
        fs::create_dir_all(site.join("inc"))?;
        fs::write(site.join("inc/client.php"), CLIENT_PHP)?;
        fs::write(site.join("notes.txt"), "https://api.example.com/ignored")?;
        let report = dir.path().join("out/report.csv");
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(&site).arg("--output").arg(&report);

        cmd.assert()
            .success()
            .stdout(contains("Data successfully saved to"))
            .stdout(contains("Total files scanned: 1"))
            .stdout(contains("Total records found: 1"))
            .stdout(contains("Total unique API URLs identified: 1"));

        let content = fs::read_to_string(&report)?;
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("File Path,API URL,Request Headers,Request Body")
        );
        let row = lines.next().unwrap_or_default();
        assert!(row.contains("https://api.example.com/v1/orders"));
        assert!(row.contains("client.php"));
        assert!(lines.next().is_none());
        Ok(())
    }

    #[test]
    fn test_output__when_default_report_location() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("client.php"), CLIENT_PHP)?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.current_dir(dir.path());

        cmd.assert().success();
        let reports: Vec<_> = fs::read_dir(dir.path().join("reports"))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].starts_with("api_urls_with_headers_and_body_"));
        assert!(reports[0].ends_with(".csv"));
        Ok(())
    }

    #[test]
    fn test_output__when_directory_missing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(dir.path().join("does-not-exist"));

        cmd.assert()
            .failure()
            .code(2)
            .stderr(contains("Invalid path"));
        Ok(())
    }

    #[test]
    fn test_output__when_report_unwritable() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("client.php"), CLIENT_PHP)?;
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(dir.path()).arg("-o").arg(blocker.join("report.csv"));

        cmd.assert()
            .failure()
            .code(4)
            .stdout(contains("Total records found: 1"));
        Ok(())
    }

    #[test]
    fn test_output__when_excluding_directories() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("vendor"))?;
        fs::write(dir.path().join("vendor/client.php"), CLIENT_PHP)?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg(dir.path()).args(["--exclude", "vendor"]);

        cmd.assert()
            .success()
            .stdout(contains("Total files scanned: 0"))
            .stdout(contains("No API URLs, headers, or body data found."));
        Ok(())
    }

    #[test]
    fn test_output__when_dry_run() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("client.php"), CLIENT_PHP)?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.current_dir(dir.path()).arg("--dry-run");

        cmd.assert()
            .success()
            .stdout(contains("1 files would be scanned"));
        assert!(!dir.path().join("reports").exists());
        Ok(())
    }
}
