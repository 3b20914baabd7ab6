use paperclip::actix::web;

use crate::handlers;

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(
            web::scope("/api")
                .service(web::resource("/guests").route(web::get().to(handlers::list_guests)))
                .service(
                    web::resource("/reservations")
                        .route(web::get().to(handlers::list_reservations)),
                )
                .service(
                    web::scope("/guest")
                        .service(web::resource("").route(web::post().to(handlers::add_guest)))
                        .service(
                            web::resource("/{guest_id}")
                                .route(web::get().to(handlers::get_guest))
                                .route(web::delete().to(handlers::delete_guest)),
                        ),
                )
                .service(
                    web::resource("/reservation")
                        .route(web::post().to(handlers::add_reservation)),
                ),
        );
}
