//! End-to-end planning scenarios.

use std::time::Duration;

use forward_goap::{
    Effect, FnKnowledgeProvider, ForwardPlanner, ForwardPlannerConfig, GoapError, Goal,
    PathNotFoundReason, Planner, PlanningAction, Precondition, SymbolId, WorldState,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn take_axe() -> PlanningAction {
    PlanningAction::new(
        "TakeAxe",
        vec![
            Precondition::is_false("HasAxe"),
            Precondition::is_not_smaller("AxesAvailable", 1),
        ],
        vec![Effect::set_true("HasAxe"), Effect::subtract("AxesAvailable", 1)],
        1.0,
    )
    .unwrap()
}

fn cut_trees() -> PlanningAction {
    PlanningAction::new(
        "CutTrees",
        vec![Precondition::is_true("HasAxe")],
        vec![Effect::add("Wood", 8)],
        5.0,
    )
    .unwrap()
}

fn from_storage(name: &str, resource: &str, storage: &str, cost: f64) -> PlanningAction {
    PlanningAction::new(
        name,
        vec![Precondition::is_not_smaller(storage, 1)],
        vec![Effect::add(resource, 1), Effect::subtract(storage, 1)],
        cost,
    )
    .unwrap()
}

fn lumberjack_state() -> WorldState {
    WorldState::builder()
        .set_symbol("Wood", 0)
        .set_symbol("Stone", 2)
        .set_symbol("HasAxe", 0)
        .set_symbol("AxesAvailable", 1)
        .build()
}

fn house_state() -> WorldState {
    WorldState::builder()
        .set_symbol("Wood", 0)
        .set_symbol("Stone", 2)
        .set_symbol("Iron", 0)
        .set_symbol("HouseBuilt", 0)
        .set_symbol("WoodInStorage", 5)
        .set_symbol("StoneInStorage", 3)
        .set_symbol("IronInStorage", 0)
        .set_symbol("HasAxe", 0)
        .set_symbol("AxesAvailable", 1)
        .build()
}

fn house_actions() -> Vec<PlanningAction> {
    vec![
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
        )
        .unwrap(),
        from_storage("GetWoodFromStorage", "Wood", "WoodInStorage", 2.0),
        from_storage("GetStoneFromStorage", "Stone", "StoneInStorage", 3.0),
        from_storage("GetIronFromStorage", "Iron", "IronInStorage", 2.0),
        cut_trees(),
        take_axe(),
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
        )
        .unwrap(),
    ]
}

#[test]
fn test_take_axe_then_cut_trees() {
    init_logger();
    let goal = Goal::new("GatherWood", vec![Precondition::is_not_smaller("Wood", 5)]);
    let actions = vec![take_axe(), cut_trees()];

    let plan = ForwardPlanner::default()
        .formulate_plan(&lumberjack_state(), &actions, &goal)
        .unwrap();

    assert_eq!(plan.action_names(), &["TakeAxe", "CutTrees"]);
    assert_eq!(plan.cost(), 6.0);
    assert_eq!(plan.len(), 2);
    plan.validate(&lumberjack_state(), &actions, &goal).unwrap();
}

#[test]
fn test_unreachable_goal() {
    init_logger();
    let knowledge = lumberjack_state().build_upon().set_symbol("Iron", 0).build();
    let goal = Goal::new("GetIron", vec![Precondition::is_not_smaller("Iron", 1)]);

    let result =
        ForwardPlanner::default().formulate_plan(&knowledge, &[take_axe(), cut_trees()], &goal);

    match result {
        Err(GoapError::PlanNotFound {
            goal: failed,
            max_plan_length,
            ..
        }) => {
            assert_eq!(*failed, goal);
            assert_eq!(max_plan_length, 20);
        }
        other => panic!("expected PlanNotFound, got {:?}", other),
    }
}

#[test]
fn test_goal_already_satisfied() {
    init_logger();
    let goal = Goal::new("HaveStone", vec![Precondition::is_not_smaller("Stone", 2)]);

    let plan = ForwardPlanner::default()
        .formulate_plan(&lumberjack_state(), &[take_axe(), cut_trees()], &goal)
        .unwrap();

    assert!(plan.is_empty());
    assert_eq!(plan.len(), 0);
    assert_eq!(plan.cost(), 0.0);
}

#[test]
fn test_plan_length_is_bounded() {
    init_logger();
    let step = |name: &str, from: &str, to: &str| {
        PlanningAction::new(
            name,
            vec![Precondition::is_true(from)],
            vec![Effect::set_false(from), Effect::set_true(to)],
            1.0,
        )
        .unwrap()
    };
    let actions = vec![step("AB", "A", "B"), step("BC", "B", "C"), step("CD", "C", "D")];
    let state = WorldState::builder()
        .set_symbol("A", 1)
        .set_symbol("B", 0)
        .set_symbol("C", 0)
        .set_symbol("D", 0)
        .build();
    let goal = Goal::new("AtD", vec![Precondition::is_true("D")]);

    let short =
        ForwardPlanner::new(ForwardPlannerConfig::default().with_max_plan_length(2)).unwrap();
    assert!(matches!(
        short.formulate_plan(&state, &actions, &goal),
        Err(GoapError::PlanNotFound { max_plan_length: 2, .. })
    ));

    let exact =
        ForwardPlanner::new(ForwardPlannerConfig::default().with_max_plan_length(3)).unwrap();
    let plan = exact.formulate_plan(&state, &actions, &goal).unwrap();
    assert_eq!(plan.action_names(), &["AB", "BC", "CD"]);
}

#[test]
fn test_plans_never_exceed_max_length() {
    init_logger();
    let goal = Goal::new("LotsOfWood", vec![Precondition::is_not_smaller("Wood", 40)]);
    let actions = vec![take_axe(), cut_trees()];

    for max_plan_length in 1..=7 {
        let planner = ForwardPlanner::new(
            ForwardPlannerConfig::default().with_max_plan_length(max_plan_length),
        )
        .unwrap();
        match planner.formulate_plan(&lumberjack_state(), &actions, &goal) {
            Ok(plan) => {
                assert!(plan.len() <= max_plan_length);
                // One axe and five cuts are needed.
                assert_eq!(plan.len(), 6);
            }
            Err(GoapError::PlanNotFound { cause, .. }) => {
                assert!(max_plan_length < 6);
                assert_eq!(cause.reason, PathNotFoundReason::DepthLimitReached);
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
}

#[test]
fn test_build_house_scenario() {
    init_logger();
    let goal = Goal::new("BuildHouse", vec![Precondition::is_true("HouseBuilt")]);
    let actions = house_actions();
    // Generous budget so unoptimized builds finish the search.
    let planner = ForwardPlanner::new(
        ForwardPlannerConfig::default().with_search_time_limit(Duration::from_secs(30)),
    )
    .unwrap();

    let plan = planner.formulate_plan(&house_state(), &actions, &goal).unwrap();

    plan.validate(&house_state(), &actions, &goal).unwrap();
    // TakeAxe, three CutTrees, three GetStoneFromStorage and BuildHouse.
    assert_eq!(plan.cost(), 55.0);
    assert_eq!(plan.len(), 8);
    assert_eq!(plan.action_names().last().map(String::as_str), Some("BuildHouse"));
}

#[test]
fn test_knowledge_is_only_asked_for_relevant_symbols() {
    init_logger();
    let asked = std::sync::Mutex::new(Vec::new());
    let provider = FnKnowledgeProvider::new(|symbol: &SymbolId| {
        asked.lock().unwrap().push(symbol.name().to_string());
        match symbol.name() {
            "AxesAvailable" => 1,
            _ => 0,
        }
    });
    let goal = Goal::new("GatherWood", vec![Precondition::is_not_smaller("Wood", 5)]);

    let plan = ForwardPlanner::default()
        .formulate_plan(&provider, &[take_axe(), cut_trees()], &goal)
        .unwrap();

    assert_eq!(plan.len(), 2);
    let mut asked = asked.into_inner().unwrap();
    asked.sort();
    assert_eq!(asked, vec!["AxesAvailable", "HasAxe", "Wood"]);
}

#[test]
fn test_planner_is_shareable_across_threads() {
    init_logger();
    let planner = ForwardPlanner::default();
    let actions = vec![take_axe(), cut_trees()];
    let goal = Goal::new("GatherWood", vec![Precondition::is_not_smaller("Wood", 5)]);
    let state = lumberjack_state();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| planner.formulate_plan(&state, &actions, &goal)))
            .collect();
        for handle in handles {
            let plan = handle.join().unwrap().unwrap();
            assert_eq!(plan.action_names(), &["TakeAxe", "CutTrees"]);
        }
    });
}

#[test]
fn test_model_errors_are_not_wrapped() {
    init_logger();
    // The knowledge source has no value for AxesAvailable.
    let knowledge = WorldState::builder()
        .set_symbol("Wood", 0)
        .set_symbol("HasAxe", 0)
        .build();
    let goal = Goal::new("GatherWood", vec![Precondition::is_not_smaller("Wood", 5)]);

    let result =
        ForwardPlanner::default().formulate_plan(&knowledge, &[take_axe(), cut_trees()], &goal);
    assert!(matches!(
        result,
        Err(GoapError::SymbolNotPresent(symbol)) if symbol.name() == "AxesAvailable"
    ));
}

#[test]
fn test_time_budget_ends_search() {
    init_logger();
    // Unbounded: every state has a successor and the goal is out of reach.
    let gather =
        PlanningAction::new("Gather", vec![], vec![Effect::add("Wood", 1)], 1.0).unwrap();
    let state = WorldState::builder().set_symbol("Wood", 0).build();
    let goal = Goal::new("Hoard", vec![Precondition::is_not_smaller("Wood", i64::MAX)]);
    let planner = ForwardPlanner::new(
        ForwardPlannerConfig::default()
            .with_max_plan_length(usize::MAX)
            .with_search_time_limit(Duration::from_millis(5)),
    )
    .unwrap();

    match planner.formulate_plan(&state, &[gather], &goal) {
        Err(GoapError::PlanNotFound { cause, .. }) => {
            assert_eq!(cause.reason, PathNotFoundReason::TimeLimitExceeded);
            assert!(cause.elapsed >= Duration::from_millis(5));
        }
        other => panic!("expected PlanNotFound, got {:?}", other),
    }
}
