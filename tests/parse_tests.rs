use portsweep::types::expand_targets;
use portsweep::{PortSpec, ScanPlan, SpecError};

fn ports(spec: &str) -> Vec<u16> {
    spec.parse::<PortSpec>()
        .unwrap()
        .to_ports()
        .into_iter()
        .map(u16::from)
        .collect()
}

#[test]
fn port_union_is_sorted_and_deduplicated() {
    assert_eq!(ports("22,80-82,22"), vec![22, 80, 81, 82]);
    assert_eq!(ports("1000-1002,5,1001"), vec![5, 1000, 1001, 1002]);
}

#[test]
fn malformed_port_tokens_produce_no_plan() {
    for bad in ["80-", "abc", "70000"] {
        let err = bad.parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, SpecError::InvalidPortSpec { .. }));
        assert_eq!(err.token(), bad);
    }
}

#[test]
fn subnet_expansion_policy() {
    assert_eq!(
        expand_targets("192.168.1.0/30").unwrap(),
        vec!["192.168.1.1", "192.168.1.2"]
    );
    assert_eq!(
        expand_targets("192.168.1.0/31").unwrap(),
        vec!["192.168.1.0", "192.168.1.1"]
    );
    assert_eq!(expand_targets("192.168.1.9/32").unwrap(), vec!["192.168.1.9"]);
    assert_eq!(expand_targets("192.168.1.0/24").unwrap().len(), 254);
}

#[test]
fn mixed_list_keeps_first_appearance_order() {
    let hosts = expand_targets("10.0.0.9, 10.0.0.0/30 ,10.0.0.1,gateway.lan").unwrap();
    assert_eq!(hosts, vec!["10.0.0.9", "10.0.0.1", "10.0.0.2", "gateway.lan"]);
}

#[test]
fn plan_is_cartesian_target_major() {
    let spec: PortSpec = "22,80".parse().unwrap();
    let plan = ScanPlan::parse("192.168.1.0/30", &spec).unwrap();
    let items: Vec<String> = plan.iter().map(|w| w.to_string()).collect();
    assert_eq!(
        items,
        vec![
            "192.168.1.1:22",
            "192.168.1.1:80",
            "192.168.1.2:22",
            "192.168.1.2:80"
        ]
    );
}
