pub mod config;

pub mod domain {
    pub mod city {
        pub mod entity;
        pub mod errors;
        pub mod gateway;
        pub mod repository;
    }
}

pub mod application {
    pub mod mapper;

    pub mod cities {
        pub mod dto;
    }

    pub mod points_of_interest {
        pub mod dto;
        pub mod patch;
    }

    pub mod validation {
        pub mod model_errors;
        pub mod validator;
    }
}

pub mod infrastructure {
    pub mod seed;

    pub mod database {
        pub mod pool;
    }

    pub mod mail {
        pub mod local_mail_service;
        pub mod traits;
    }

    pub mod repositories {
        pub mod in_memory_city_info_gateway;
        pub mod sqlx_city_info_gateway;
    }
}

pub mod presentation {
    pub mod http {
        pub mod errors;
        pub mod extract;
        pub mod routes;
        pub mod state;

        pub mod handlers {
            pub mod cities;
            pub mod health;
            pub mod points_of_interest;
        }

        pub mod middleware {
            pub mod request_id;
        }
    }
}
