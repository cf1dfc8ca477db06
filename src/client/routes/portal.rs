use dioxus::document::Title;
use dioxus::prelude::*;
#[cfg(feature = "web")]
use dioxus_logger::tracing;

use crate::{
    client::{
        app::UserState,
        components::{Page, StatCard},
        router::Route,
        routes::NotFound,
    },
    model::{stats::DashboardStatsDto, user::UserRole},
};

/// Landing dashboard of one role's portal
#[component]
pub fn Portal(portal: String) -> Element {
    let user_state = use_context::<Signal<UserState>>();
    let state = user_state.read();

    let Some(role) = UserRole::from_portal_segment(&portal) else {
        return rsx!(NotFound { segments: vec![portal] });
    };

    rsx!(
        Title { "{role.portal_title()} | Barangay" }
        Page { heading: role.portal_title().to_string(),
            div { class: "w-full max-w-[1440px] p-2 flex flex-col gap-4",
                if let Some(user) = state.user.as_ref() {
                    p { "Welcome, {user.full_name()}" }
                }
                if role.is_staff() {
                    DashboardStats { }
                }
                if matches!(role, UserRole::Admin | UserRole::Superadmin) {
                    Link {
                        to: Route::Residents {},
                        class: "btn btn-outline w-48",
                        "Resident registry"
                    }
                }
            }
        }
    )
}

#[component]
pub fn DashboardStats() -> Element {
    #[allow(unused_mut)]
    let mut stats = use_signal(DashboardStatsDto::default);

    #[cfg(feature = "web")]
    {
        let future = use_resource(|| async move {
            crate::client::util::api::get_json::<DashboardStatsDto>("/api/stats/dashboard").await
        });

        use_effect(move || match &*future.read() {
            Some(Ok(fetched)) => stats.set(fetched.clone()),
            Some(Err(err)) => tracing::error!("{}", err),
            None => (),
        });
    }

    let stats = stats.read();

    rsx!(
        div { class: "grid grid-cols-2 md:grid-cols-3 gap-2",
            StatCard { title: "Residents", value: stats.total_residents }
            StatCard { title: "Pending incidents", value: stats.pending_incidents }
            StatCard { title: "Under investigation", value: stats.investigating_incidents }
            StatCard { title: "Resolved incidents", value: stats.resolved_incidents }
            StatCard { title: "Closed incidents", value: stats.closed_incidents }
            StatCard { title: "High priority open", value: stats.high_priority_incidents, class: "text-error" }
            StatCard { title: "Appointments today", value: stats.appointments_today }
            StatCard { title: "Pending appointments", value: stats.pending_appointments }
            StatCard { title: "Pending documents", value: stats.pending_documents }
        }
    )
}
