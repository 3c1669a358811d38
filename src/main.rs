//! CLI shell: reads one project brief from stdin, runs the observation
//! pipeline once, prints a human summary followed by the full JSON record.

use std::io::Read;

use briefscope::config;
use briefscope::observation::observer::{format_deadline, Observer};

fn main() -> std::io::Result<()> {
    briefscope::init_tracing();
    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    println!("프로젝트 설명을 입력하세요 (한국어/영어 혼용 가능, 입력 종료는 Ctrl-D):");

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let result = Observer::new().observe(&input);

    println!();
    println!("── 관찰 결과 ──");
    if let Some(days) = result.deadline_days {
        println!("일정: {} ({days}일)", format_deadline(days));
    }
    if let Some(size) = result.team_size {
        println!("인원: {size}명");
    } else if let (Some(min), Some(max)) = (result.team_size_min, result.team_size_max) {
        println!("인원: {min}~{max}명 (확정 필요)");
    }
    if let Some(platform) = &result.platform {
        println!("플랫폼: {platform}");
    }
    if !result.language_stack.is_empty() {
        println!("스택: {}", result.language_stack.join("/"));
    }
    if !result.forbidden.is_empty() {
        println!("금지: {}", result.forbidden.join(", "));
    }
    println!("모호성 점수: {}/100", result.ambiguity_score);
    for unknown in &result.unknowns {
        println!("[미확인] {}", unknown.question);
    }

    println!();
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("결과 직렬화 실패: {err}"),
    }

    Ok(())
}
