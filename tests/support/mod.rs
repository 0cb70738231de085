#![allow(dead_code)]

pub mod http;
pub mod quiz_env;

use std::thread;
use std::time::{Duration, Instant};

use quantquiz::egui_app::controller::EguiController;

/// Pump background jobs until `done` holds or five seconds pass.
pub fn drain_until(controller: &mut EguiController, done: impl Fn(&EguiController) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        controller.poll_background_jobs();
        if done(controller) {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("background jobs did not finish in time");
}

pub const PROBLEM_JSON: &str = r#"{
    "id": "TSD-001",
    "category": "Time-Speed-Distance",
    "difficulty": "MEDIUM",
    "question": "A train covers 120 km in 2 hours. What is its speed?",
    "options": {"A": "40 km/h", "B": "60 km/h", "C": "80 km/h", "D": "100 km/h"},
    "correct_answer": "B",
    "explanation": "120 / 2 = 60",
    "validation_score": 0.97,
    "ground_truth": 60.0,
    "solver_a_result": {"answer": 60.0, "confidence": 0.95, "reasoning": "d/t"},
    "solver_b_result": {"answer": 60.0, "confidence": 0.9, "selected_option": "B"}
}"#;
