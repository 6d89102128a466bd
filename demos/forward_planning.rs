//! Plans how to build a house from what is lying around.
//!
//! Run with `RUST_LOG=debug cargo run --example forward_planning` to see the
//! planner's progress.

use std::time::{Duration, Instant};

use forward_goap::{
    Effect, ForwardPlanner, ForwardPlannerConfig, GoapError, Goal, Planner, PlanningAction,
    Precondition, WorldState,
};

fn from_storage(
    name: &str,
    resource: &str,
    storage: &str,
    cost: f64,
) -> forward_goap::Result<PlanningAction> {
    PlanningAction::new(
        name,
        vec![Precondition::is_not_smaller(storage, 1)],
        vec![Effect::add(resource, 1), Effect::subtract(storage, 1)],
        cost,
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let current_world_state = WorldState::builder()
        .set_symbol("Wood", 0)
        .set_symbol("Stone", 2)
        .set_symbol("Iron", 0)
        .set_symbol("HouseBuilt", 0)
        .set_symbol("WoodInStorage", 5)
        .set_symbol("StoneInStorage", 3)
        .set_symbol("IronInStorage", 0)
        .set_symbol("HasAxe", 0)
        .set_symbol("AxesAvailable", 1)
        .build();

    let available_actions = vec![
        PlanningAction::new(
            "BuildHouse",
            vec![
                Precondition::is_not_smaller("Wood", 20),
                Precondition::is_not_smaller("Stone", 5),
            ],
            vec![
                Effect::set_true("HouseBuilt"),
                Effect::subtract("Wood", 20),
                Effect::subtract("Stone", 5),
            ],
            30.0,
        )?,
        from_storage("GetWoodFromStorage", "Wood", "WoodInStorage", 2.0)?,
        from_storage("GetStoneFromStorage", "Stone", "StoneInStorage", 3.0)?,
        from_storage("GetIronFromStorage", "Iron", "IronInStorage", 2.0)?,
        PlanningAction::new(
            "CutTrees",
            vec![Precondition::is_true("HasAxe")],
            vec![Effect::add("Wood", 8)],
            5.0,
        )?,
        PlanningAction::new(
            "TakeAxe",
            vec![
                Precondition::is_false("HasAxe"),
                Precondition::is_not_smaller("AxesAvailable", 1),
            ],
            vec![Effect::set_true("HasAxe"), Effect::subtract("AxesAvailable", 1)],
            1.0,
        )?,
        PlanningAction::new(
            "MakeAxe",
            vec![
                Precondition::is_false("HasAxe"),
                Precondition::is_not_smaller("Wood", 2),
                Precondition::is_not_smaller("Iron", 3),
            ],
            vec![
                Effect::set_true("HasAxe"),
                Effect::subtract("Wood", 2),
                Effect::subtract("Iron", 3),
            ],
            15.0,
        )?,
    ];

    let build_house_goal = Goal::new("BuildHouse", vec![Precondition::is_true("HouseBuilt")]);

    let planner = ForwardPlanner::new(
        ForwardPlannerConfig::default().with_search_time_limit(Duration::from_secs(2)),
    )?;

    let started = Instant::now();
    match planner.formulate_plan(&current_world_state, &available_actions, &build_house_goal) {
        Ok(plan) => {
            println!(
                "Found a plan of length {} and cost {} to satisfy \"{}\" in {:?}",
                plan.len(),
                plan.cost(),
                build_house_goal.name(),
                started.elapsed()
            );
            println!("{}", plan);
            plan.validate(&current_world_state, &available_actions, &build_house_goal)?;
        }
        Err(GoapError::PlanNotFound { cause, .. }) => {
            eprintln!("No plan for \"{}\": {}", build_house_goal.name(), cause);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
