//! End-to-end checks against a running progress API.
//!
//! Each check is a single shot: a failed request or assertion is reported
//! and counted, never retried. Checks that later ones depend on abort the
//! run when they fail.

use anyhow::{bail, ensure, Context};
use std::time::Duration;

use crate::client::ProgressClient;
use crate::dto::ProgressResponse;
use crate::models::day::DAY_COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
}

#[derive(Debug, Clone)]
pub struct SmokeOptions {
    /// Pause between day completions.
    pub step_delay: Duration,
}

impl Default for SmokeOptions {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(500),
        }
    }
}

fn print_header(name: &str) {
    println!("\n{}", "=".repeat(60));
    println!("TEST: {}", name);
    println!("{}", "=".repeat(60));
}

fn print_result(passed: bool, message: &str) {
    let status = if passed { "PASS" } else { "FAIL" };
    println!("{}: {}", status, message);
}

async fn check<F, Fut>(outcomes: &mut Vec<CheckOutcome>, name: &'static str, f: F) -> bool
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<String>>,
{
    print_header(name);
    let passed = match f().await {
        Ok(message) => {
            print_result(true, &message);
            true
        }
        Err(e) => {
            tracing::debug!(check = name, error = ?e, "Check failed");
            print_result(false, &format!("{:#}", e));
            false
        }
    };
    outcomes.push(CheckOutcome { name, passed });
    passed
}

pub async fn check_api_root(client: &ProgressClient) -> anyhow::Result<String> {
    let resp = client.root().await.context("API root request failed")?;
    ensure!(
        resp.message.contains("Valentine's Week App API"),
        "Unexpected response message: {}",
        resp.message
    );
    Ok("API root endpoint working correctly".into())
}

pub async fn check_reset(client: &ProgressClient) -> anyhow::Result<String> {
    client.reset().await.context("Reset failed")?;
    Ok("Progress reset successfully".into())
}

pub fn verify_initial(progress: &ProgressResponse) -> anyhow::Result<()> {
    ensure!(
        progress.days.len() == DAY_COUNT,
        "Expected {} days, got {}",
        DAY_COUNT,
        progress.days.len()
    );
    let day1 = &progress.days[0];
    ensure!(
        day1.is_unlocked && !day1.is_completed,
        "Day 1 should be unlocked but not completed initially"
    );
    for day in &progress.days[1..] {
        ensure!(!day.is_unlocked, "Day {} should be locked initially", day.day_number);
    }
    ensure!(
        !progress.replay_mode && !progress.all_completed,
        "replay_mode and all_completed should be false initially"
    );
    Ok(())
}

pub async fn check_initial_progress(client: &ProgressClient) -> anyhow::Result<String> {
    let progress = client.progress().await.context("Progress request failed")?;
    verify_initial(&progress)?;
    Ok("Initial progress structure is correct".into())
}

pub fn verify_completed_day(progress: &ProgressResponse, day_number: usize) -> anyhow::Result<()> {
    ensure!(
        progress.days.len() == DAY_COUNT,
        "Expected {} days, got {}",
        DAY_COUNT,
        progress.days.len()
    );
    let Some(day) = day_number.checked_sub(1).and_then(|i| progress.days.get(i)) else {
        bail!("Response has no entry for day {}", day_number);
    };
    ensure!(day.is_completed, "Day {} should be marked as completed", day_number);
    ensure!(
        day.completion_time.is_some(),
        "Day {} should have completion_time set",
        day_number
    );

    if day_number < DAY_COUNT {
        ensure!(
            progress.days[day_number].is_unlocked,
            "Day {} should be unlocked after completing day {}",
            day_number + 1,
            day_number
        );
    } else {
        ensure!(progress.all_completed, "all_completed should be true after completing day {}", DAY_COUNT);
        ensure!(progress.replay_mode, "replay_mode should be true after completing day {}", DAY_COUNT);
        if let Some(locked) = progress.days.iter().find(|d| !d.is_unlocked) {
            bail!(
                "All days should be unlocked in replay mode, but day {} is locked",
                locked.day_number
            );
        }
    }
    Ok(())
}

pub async fn check_sequential_completion(
    client: &ProgressClient,
    options: &SmokeOptions,
) -> anyhow::Result<String> {
    for day_number in 1..=DAY_COUNT {
        let progress = client
            .complete_day(day_number as i64)
            .await
            .with_context(|| format!("Completing day {} failed", day_number))?;
        verify_completed_day(&progress, day_number)?;
        println!("Day {} completed", day_number);

        if day_number < DAY_COUNT && !options.step_delay.is_zero() {
            tokio::time::sleep(options.step_delay).await;
        }
    }
    Ok(format!("All {} days completed with replay mode enabled", DAY_COUNT))
}

pub async fn check_persistence(client: &ProgressClient) -> anyhow::Result<String> {
    let progress = client.progress().await.context("Progress request failed")?;
    let completed = progress.days.iter().filter(|d| d.is_completed).count();
    ensure!(
        completed == DAY_COUNT,
        "Expected {} completed days, found {}",
        DAY_COUNT,
        completed
    );
    ensure!(
        progress.all_completed && progress.replay_mode,
        "all_completed and replay_mode should still be true"
    );
    Ok("Progress persisted correctly across requests".into())
}

pub async fn check_invalid_days(client: &ProgressClient) -> anyhow::Result<String> {
    let before = client.progress().await.context("Progress request failed")?;
    for day_number in [0, DAY_COUNT as i64 + 1] {
        match client.complete_day(day_number).await {
            Ok(_) => bail!("Completing day {} should have been rejected", day_number),
            Err(e) if e.status().is_some() => {}
            Err(e) => return Err(e).context("Request for invalid day failed"),
        }
    }
    let after = client.progress().await.context("Progress request failed")?;
    ensure!(
        before.days == after.days
            && before.replay_mode == after.replay_mode
            && before.all_completed == after.all_completed,
        "Progress changed after rejected completions"
    );
    Ok("Out-of-range days rejected without changing progress".into())
}

/// Runs every check in order and returns one outcome per check attempted.
pub async fn run_all(client: &ProgressClient, options: &SmokeOptions) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::new();

    println!("\n{}", "=".repeat(80));
    println!("VALENTINE'S WEEK APP - BACKEND API TESTS");
    println!("Backend URL: {}", client.base_url());
    println!("{}", "=".repeat(80));

    if !check(&mut outcomes, "API Root", || check_api_root(client)).await {
        print_result(false, "Cannot continue testing - API root endpoint failed");
        return outcomes;
    }

    check(&mut outcomes, "Progress Reset", || check_reset(client)).await;

    if !check(&mut outcomes, "Initial Progress", || check_initial_progress(client)).await {
        print_result(false, "Cannot continue testing - initial progress failed");
        return outcomes;
    }

    if check(&mut outcomes, "Sequential Completion", || {
        check_sequential_completion(client, options)
    })
    .await
    {
        check(&mut outcomes, "Progress Persistence", || check_persistence(client)).await;
    }

    check(&mut outcomes, "Invalid Day Rejection", || check_invalid_days(client)).await;

    print_summary(&outcomes);
    outcomes
}

fn print_summary(outcomes: &[CheckOutcome]) {
    print_header("TEST SUMMARY");
    for outcome in outcomes {
        print_result(outcome.passed, outcome.name);
    }
    let passed = outcomes.iter().filter(|o| o.passed).count();
    println!("\nOverall Result: {}/{} tests passed", passed, outcomes.len());
}
