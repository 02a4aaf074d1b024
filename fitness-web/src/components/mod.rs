pub(crate) mod activity_form;
pub(crate) mod activity_list;
pub(crate) mod loading;
pub(crate) mod notification;
pub(crate) mod recommendation_panel;
pub(crate) mod stat_card;
