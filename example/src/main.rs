// example/src/main.rs

mod data;
mod screens;

use intention::{Context, ExtraError};

use data::{TestParcelable, TestSerializable};
use screens::{DetailRouter, DetailRouterUtil};

fn main() -> Result<(), ExtraError> {
    let context = Context::new("example");
    let router = DetailRouterUtil;

    let request = router.show(
        &context,
        "Boarding pass".to_string(),
        Some(3),
        TestParcelable { id: 7, label: "seat 12A".to_string() },
        Some(TestSerializable { data: "gate B".to_string() }),
    );

    println!("destination = {}", request.destination());
    println!("title       = {:?}", request.get_string_extra("title"));
    println!("count       = {}", request.get_int_extra("count", 0));

    let ticket: Option<TestParcelable> = request.get_parcelable_extra("ticket")?;
    println!("ticket      = {:?}", ticket);

    let payload: Option<TestSerializable> = request.get_serializable_extra("payload")?;
    println!("payload     = {:?}", payload);

    // Null extras are left out.
    let request = router.pick(
        &context,
        vec![1, 2, 3],
        vec![TestParcelable { id: 1, label: "a".to_string() }],
        vec!["first".to_string(), "second".to_string()],
        None,
    );
    println!("ids         = {:?}", request.get_integer_array_list_extra("ids"));
    println!("names       = {:?}", request.get_string_array_list_extra("names"));
    println!("has labels  = {}", request.has_extra("labels"));
    println!("extras      = {}", request.extra_count());

    let request = router.open(&context);
    println!("open        = {} with {} extras", request.destination(), request.extra_count());

    Ok(())
}
