use crate::models::{Workout, WorkoutKind, WorkoutType};

pub fn render_index() -> &'static str {
    INDEX_HTML
}

/// Popup text attached to a workout's marker.
pub fn popup_content(workout: &Workout) -> String {
    format!("{} {}", workout.workout_type().icon(), workout.description)
}

pub fn popup_class(workout_type: WorkoutType) -> String {
    format!("{}-popup", workout_type.as_str())
}

/// List markup for every workout, newest first.
pub fn render_workout_list(workouts: &[Workout]) -> String {
    workouts.iter().rev().map(render_workout_entry).collect()
}

pub fn render_workout_entry(workout: &Workout) -> String {
    let kind = workout.workout_type();
    let mut html = format!(
        r#"<li class="workout workout--{type_}" data-id="{id}">
  <h2 class="workout__title">{description}</h2>
{distance}{duration}"#,
        type_ = kind.as_str(),
        id = workout.id,
        description = workout.description,
        distance = detail(kind.icon(), &workout.distance.to_string(), "km"),
        duration = detail("⏱", &workout.duration.to_string(), "min"),
    );

    match workout.kind {
        WorkoutKind::Running { cadence, pace } => {
            html.push_str(&detail("⚡️", &format!("{pace:.1}"), "min/km"));
            html.push_str(&detail("🦶🏼", &cadence.to_string(), "spm"));
        }
        WorkoutKind::Cycling {
            elevation_gain,
            speed,
        } => {
            html.push_str(&detail("⚡️", &format!("{speed:.1}"), "km/h"));
            html.push_str(&detail("⛰", &elevation_gain.to_string(), "m"));
        }
    }

    html.push_str("</li>\n");
    html
}

fn detail(icon: &str, value: &str, unit: &str) -> String {
    format!(
        r#"  <div class="workout__details">
    <span class="workout__icon">{icon}</span>
    <span class="workout__value">{value}</span>
    <span class="workout__unit">{unit}</span>
  </div>
"#
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Workout Map</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
  <script defer src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Manrope:wght@400;600;700;800&display=swap');

    :root {
      --color-brand--1: #ffb545;
      --color-brand--2: #00c46a;
      --color-dark--1: #2d3439;
      --color-dark--2: #42484d;
      --color-light--1: #aaa;
      --color-light--2: #ececec;
      --color-light--3: rgb(214, 222, 224);
    }

    * {
      margin: 0;
      padding: 0;
      box-sizing: border-box;
    }

    body {
      font-family: 'Manrope', sans-serif;
      color: var(--color-light--2);
      font-weight: 400;
      line-height: 1.6;
      height: 100vh;
      overscroll-behavior-y: none;
      background-color: #fff;
      padding: 2.5rem;
      display: flex;
    }

    .sidebar {
      flex-basis: 50rem;
      background-color: var(--color-dark--1);
      padding: 3rem 5rem 4rem 5rem;
      display: flex;
      flex-direction: column;
    }

    .sidebar h1 {
      font-size: 1.6rem;
      margin-bottom: 2rem;
      align-self: center;
    }

    .workouts {
      list-style: none;
      height: 77vh;
      overflow-y: scroll;
      overflow-x: hidden;
    }

    .workouts::-webkit-scrollbar {
      width: 0;
    }

    .workout {
      background-color: var(--color-dark--2);
      border-radius: 5px;
      padding: 1rem 1.5rem;
      margin-bottom: 1rem;
      cursor: pointer;
      display: grid;
      grid-template-columns: 1fr 1fr 1fr 1fr;
      gap: 0.5rem 1rem;
    }

    .workout--running {
      border-left: 5px solid var(--color-brand--2);
    }

    .workout--cycling {
      border-left: 5px solid var(--color-brand--1);
    }

    .workout__title {
      font-size: 1rem;
      font-weight: 600;
      grid-column: 1 / -1;
    }

    .workout__details {
      display: flex;
      align-items: baseline;
    }

    .workout__icon {
      font-size: 1rem;
      margin-right: 0.2rem;
      height: 0.28rem;
    }

    .workout__value {
      font-size: 1rem;
      margin-right: 0.5rem;
    }

    .workout__unit {
      font-size: 0.8rem;
      color: var(--color-light--1);
      text-transform: uppercase;
      font-weight: 800;
    }

    .form {
      background-color: var(--color-dark--2);
      border-radius: 5px;
      padding: 1.5rem 2.75rem;
      margin-bottom: 1.75rem;
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 0.5rem 2.5rem;
      height: 9.25rem;
      transition: all 0.5s, transform 1ms;
    }

    .form.hidden {
      transform: translateY(-30rem);
      height: 0;
      padding: 0 2.25rem;
      margin-bottom: 0;
      opacity: 0;
    }

    .form__row {
      display: flex;
      align-items: center;
    }

    .form__row--hidden {
      display: none;
    }

    .form__label {
      flex: 0 0 50%;
      font-size: 0.9rem;
      font-weight: 600;
    }

    .form__input {
      width: 100%;
      padding: 0.3rem 1.1rem;
      font-family: inherit;
      font-size: 0.9rem;
      border: none;
      border-radius: 3px;
      background-color: var(--color-light--3);
      transition: all 0.2s;
    }

    .form__btn {
      display: none;
    }

    .reset {
      margin-top: auto;
      align-self: center;
      background: none;
      border: 1px solid var(--color-light--1);
      color: var(--color-light--1);
      border-radius: 3px;
      padding: 0.3rem 1rem;
      cursor: pointer;
    }

    .notice {
      min-height: 1.4em;
      color: var(--color-brand--1);
      margin-bottom: 1rem;
    }

    #map {
      flex: 1;
      height: 100%;
      background-color: var(--color-light--1);
    }

    .leaflet-popup .leaflet-popup-content-wrapper {
      background-color: var(--color-dark--1);
      color: var(--color-light--2);
      border-radius: 5px;
      padding-right: 0.6rem;
    }

    .leaflet-popup .leaflet-popup-content {
      font-size: 1rem;
    }

    .leaflet-popup .leaflet-popup-tip {
      background-color: var(--color-dark--1);
    }

    .running-popup .leaflet-popup-content-wrapper {
      border-left: 5px solid var(--color-brand--2);
    }

    .cycling-popup .leaflet-popup-content-wrapper {
      border-left: 5px solid var(--color-brand--1);
    }
  </style>
</head>
<body>
  <div class="sidebar">
    <h1>Workout Map</h1>
    <div class="notice" id="notice"></div>
    <ul class="workouts">
      <form class="form hidden">
        <div class="form__row">
          <label class="form__label">Type</label>
          <select class="form__input form__input--type">
            <option value="running">Running</option>
            <option value="cycling">Cycling</option>
          </select>
        </div>
        <div class="form__row">
          <label class="form__label">Distance</label>
          <input class="form__input form__input--distance" placeholder="km" />
        </div>
        <div class="form__row">
          <label class="form__label">Duration</label>
          <input class="form__input form__input--duration" placeholder="min" />
        </div>
        <div class="form__row">
          <label class="form__label">Cadence</label>
          <input class="form__input form__input--cadence" placeholder="step/min" />
        </div>
        <div class="form__row form__row--hidden">
          <label class="form__label">Elev Gain</label>
          <input class="form__input form__input--elevation" placeholder="meters" />
        </div>
        <button class="form__btn">OK</button>
      </form>
      <div id="entries"></div>
    </ul>
    <button class="reset" type="button" id="reset">Clear all workouts</button>
  </div>

  <div id="map"></div>

  <script>
    const form = document.querySelector('.form');
    const entriesEl = document.getElementById('entries');
    const noticeEl = document.getElementById('notice');
    const resetBtn = document.getElementById('reset');
    const inputType = document.querySelector('.form__input--type');
    const inputs = {
      distance: document.querySelector('.form__input--distance'),
      duration: document.querySelector('.form__input--duration'),
      cadence: document.querySelector('.form__input--cadence'),
      elevation: document.querySelector('.form__input--elevation')
    };

    let leafletMap = null;
    let renderedMarkers = [];
    let lastCenter = null;

    const request = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const renderMap = (view) => {
      if (!view.center) {
        return;
      }
      if (!leafletMap) {
        leafletMap = L.map('map').setView(view.center, view.zoom);
        L.tileLayer('https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png', {
          attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
        }).addTo(leafletMap);
        leafletMap.on('click', (mapE) => {
          const { lat, lng } = mapE.latlng;
          request('POST', '/api/map/click', { lat, lng }).then(render).catch(showError);
        });
      } else if (!lastCenter || lastCenter[0] !== view.center[0] || lastCenter[1] !== view.center[1]) {
        leafletMap.setView(view.center, view.zoom, {
          animate: view.animate,
          pan: { duration: 1 }
        });
      }
      lastCenter = view.center;

      if (view.markers.length < renderedMarkers.length) {
        renderedMarkers.forEach((marker) => marker.remove());
        renderedMarkers = [];
      }
      view.markers.slice(renderedMarkers.length).forEach((marker) => {
        const leafletMarker = L.marker(marker.coords)
          .addTo(leafletMap)
          .bindPopup(
            L.popup({
              maxWidth: 250,
              minWidth: 100,
              autoClose: false,
              closeOnClick: false,
              className: marker.style_class
            })
          )
          .setPopupContent(marker.popup)
          .openPopup();
        renderedMarkers.push(leafletMarker);
      });
    };

    const renderForm = (view) => {
      inputType.value = view.type;
      inputs.cadence.closest('.form__row').classList.toggle('form__row--hidden', view.secondary !== 'cadence');
      inputs.elevation.closest('.form__row').classList.toggle('form__row--hidden', view.secondary !== 'elevation');

      if (view.visible) {
        form.classList.remove('hidden');
        if (view.focus && document.activeElement !== inputs[view.focus]) {
          inputs[view.focus].focus();
        }
        return;
      }
      if (!form.classList.contains('hidden')) {
        Object.keys(inputs).forEach((name) => {
          inputs[name].value = view.fields[name];
        });
        if (view.reveal_after_ms) {
          form.style.display = 'none';
          form.classList.add('hidden');
          setTimeout(() => (form.style.display = 'grid'), view.reveal_after_ms);
        } else {
          form.classList.add('hidden');
        }
      }
    };

    const render = (snapshot) => {
      noticeEl.textContent = snapshot.notice || '';
      renderMap(snapshot.map);
      renderForm(snapshot.form);
      entriesEl.innerHTML = snapshot.list_html;
    };

    const showError = (err) => {
      alert(err.message);
      request('GET', '/api/state').then(render).catch(() => {});
    };

    const reportPosition = () => {
      if (!navigator.geolocation) {
        request('POST', '/api/location', { status: 'denied' }).then(render).catch(showError);
        return;
      }
      navigator.geolocation.getCurrentPosition(
        (position) => {
          const { latitude, longitude } = position.coords;
          request('POST', '/api/location', { status: 'granted', latitude, longitude }).then(render).catch(showError);
        },
        () => {
          request('POST', '/api/location', { status: 'denied' })
            .then((snapshot) => {
              render(snapshot);
              alert(snapshot.notice);
            })
            .catch(showError);
        }
      );
    };

    form.addEventListener('submit', (e) => {
      e.preventDefault();
      request('POST', '/api/form/submit', {
        type: inputType.value,
        distance: inputs.distance.value,
        duration: inputs.duration.value,
        cadence: inputs.cadence.value,
        elevation: inputs.elevation.value
      }).then(render).catch(showError);
    });

    inputType.addEventListener('change', () => {
      request('POST', '/api/form/type', { type: inputType.value }).then(render).catch(showError);
    });

    entriesEl.addEventListener('click', (e) => {
      const workoutEl = e.target.closest('.workout');
      if (!workoutEl) {
        return;
      }
      request('POST', `/api/workouts/${workoutEl.dataset.id}/activate`).then(render).catch(showError);
    });

    resetBtn.addEventListener('click', () => {
      request('DELETE', '/api/workouts').then(render).catch(showError);
    });

    window.addEventListener('load', () => {
      request('GET', '/api/state')
        .then((snapshot) => {
          render(snapshot);
          if (snapshot.phase === 'locating') {
            reportPosition();
          }
        })
        .catch(showError);
    });
  </script>
</body>
</html>
"#;
