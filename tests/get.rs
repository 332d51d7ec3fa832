mod common;

use common::setup;
use deploycat::get::resource_summary;

#[test]
fn resource_totals() {
    let dir = setup();
    let summary = resource_summary(&[dir.join("valid")]).unwrap();
    assert_eq!(summary.deployments.len(), 3);

    let web = &summary.deployments["web"];
    assert_eq!(web.requests.cpu, 0.5);
    assert_eq!(web.requests.memory, 0.5);
    assert_eq!(web.limits.cpu, 1.0);
    assert_eq!(web.limits.memory, 1.0);

    let api = &summary.deployments["api"];
    assert_eq!(api.limits.cpu, 3.0);
    assert_eq!(api.limits.memory, 3.0);

    let hello = &summary.deployments["helloworld"];
    assert_eq!(hello.limits.cpu, 1.0);
    assert_eq!(hello.limits.memory, 0.75);

    assert_eq!(summary.total.limits.cpu, 5.0);
    assert_eq!(summary.total.requests.cpu, 0.5);
}
