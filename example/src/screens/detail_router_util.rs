// @generated by intention-compiler from screens::DetailRouter. Do not edit.

#[allow(unused_imports)]
use intention::{Context, Destination, Request};
#[allow(unused_imports)]
use crate::data::TestParcelable;
#[allow(unused_imports)]
use crate::data::TestSerializable;

#[allow(non_snake_case)]
pub trait DetailRouter {
    fn open(
        &self,
        context: &Context,
    ) -> Request;
    fn show(
        &self,
        context: &Context,
        title: String,
        count: Option<i32>,
        ticket: TestParcelable,
        payload: Option<TestSerializable>,
    ) -> Request;
    fn pick(
        &self,
        context: &Context,
        ids: Vec<i32>,
        tickets: Vec<TestParcelable>,
        names: Vec<String>,
        labels: Option<Vec<String>>,
    ) -> Request;
}

pub struct DetailRouterUtil;

#[allow(non_snake_case)]
impl DetailRouter for DetailRouterUtil {
    fn open(
        &self,
        context: &Context,
    ) -> Request {
        let request = Request::new(context, Destination::new("screens", "DetailScreen"));
        request
    }

    fn show(
        &self,
        context: &Context,
        title: String,
        count: Option<i32>,
        ticket: TestParcelable,
        payload: Option<TestSerializable>,
    ) -> Request {
        let mut request = Request::new(context, Destination::new("screens", "DetailScreen"));
        request.put_extra("title", title);
        if let Some(count) = count {
            request.put_extra("count", count);
        }
        request.put_extra("ticket", ticket);
        if let Some(payload) = payload {
            request.put_extra("payload", payload);
        }
        request
    }

    fn pick(
        &self,
        context: &Context,
        ids: Vec<i32>,
        tickets: Vec<TestParcelable>,
        names: Vec<String>,
        labels: Option<Vec<String>>,
    ) -> Request {
        let mut request = Request::new(context, Destination::new("screens", "DetailScreen"));
        request.put_integer_array_list_extra("ids", ids);
        request.put_parcelable_array_list_extra("tickets", tickets);
        request.put_string_array_list_extra("names", names);
        if let Some(labels) = labels {
            request.put_char_sequence_array_list_extra("labels", labels);
        }
        request
    }
}
